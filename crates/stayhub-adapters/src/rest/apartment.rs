use async_trait::async_trait;

use stayhub_core::apartment::Apartment;
use stayhub_core::ids::ApartmentId;
use stayhub_ports::error::PortError;
use stayhub_ports::outbound::ApartmentRepository;

use super::wire::ApartmentDto;
use super::RestClient;

#[async_trait]
impl ApartmentRepository for RestClient {
    async fn find_by_id(&self, id: &ApartmentId) -> Result<Option<Apartment>, PortError> {
        let request = self.http.get(self.apartments_url(&format!("/{id}")));
        match self.fetch_optional::<ApartmentDto>(request).await? {
            Some(dto) => Ok(Some(Apartment::try_from(dto)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Apartment>, PortError> {
        let dtos: Vec<ApartmentDto> = self.fetch(self.http.get(self.apartments_url("/"))).await?;
        dtos.into_iter().map(Apartment::try_from).collect()
    }

    async fn create(&self, apartment: &Apartment) -> Result<(), PortError> {
        let request = self
            .http
            .post(self.apartments_url("/"))
            .json(&ApartmentDto::from(apartment));
        self.send(request).await?;
        tracing::info!(apartment_id = %apartment.id(), "apartment created");
        Ok(())
    }

    async fn update(&self, apartment: &Apartment) -> Result<(), PortError> {
        let request = self
            .http
            .put(self.apartments_url(&format!("/{}", apartment.id())))
            .json(&ApartmentDto::from(apartment));
        self.send(request).await?;
        tracing::info!(apartment_id = %apartment.id(), "apartment updated");
        Ok(())
    }
}

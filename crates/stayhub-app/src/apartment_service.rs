use stayhub_core::apartment::{Apartment, ApartmentDraft, ApartmentFilter};
use stayhub_core::ids::ApartmentId;
use stayhub_core::session::Session;
use stayhub_ports::error::PortError;
use stayhub_ports::outbound::ApartmentRepository;

use crate::error::AppError;

pub struct ApartmentService<A>
where
    A: ApartmentRepository,
{
    apartments: A,
}

impl<A> ApartmentService<A>
where
    A: ApartmentRepository,
{
    pub fn new(apartments: A) -> Self {
        Self { apartments }
    }

    pub async fn search(&self, filter: &ApartmentFilter) -> Result<Vec<Apartment>, AppError> {
        let all = self.apartments.list_all().await?;
        Ok(filter.apply(all))
    }

    pub async fn get(&self, id: &ApartmentId) -> Result<Apartment, AppError> {
        self.apartments
            .find_by_id(id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))
    }

    pub async fn create(
        &self,
        session: &Session,
        draft: ApartmentDraft,
    ) -> Result<ApartmentId, AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let apartment = Apartment::new(draft)?;
        self.apartments.create(&apartment).await?;
        Ok(apartment.id().clone())
    }

    pub async fn update(
        &self,
        session: &Session,
        id: &ApartmentId,
        draft: ApartmentDraft,
    ) -> Result<Apartment, AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let mut apartment = self.get(id).await?;
        apartment.update(draft)?;
        self.apartments.update(&apartment).await?;
        Ok(apartment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use stayhub_core::apartment::BedroomFilter;
    use stayhub_core::error::DomainError;
    use stayhub_core::ids::UserId;
    use stayhub_core::session::Role;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockApartmentRepo {
        apartments: Mutex<Vec<Apartment>>,
    }

    #[async_trait]
    impl ApartmentRepository for MockApartmentRepo {
        async fn find_by_id(&self, id: &ApartmentId) -> Result<Option<Apartment>, PortError> {
            let apartments = self.apartments.lock().unwrap();
            Ok(apartments.iter().find(|a| a.id() == id).cloned())
        }
        async fn list_all(&self) -> Result<Vec<Apartment>, PortError> {
            Ok(self.apartments.lock().unwrap().clone())
        }
        async fn create(&self, apartment: &Apartment) -> Result<(), PortError> {
            self.apartments.lock().unwrap().push(apartment.clone());
            Ok(())
        }
        async fn update(&self, apartment: &Apartment) -> Result<(), PortError> {
            let mut apartments = self.apartments.lock().unwrap();
            let slot = apartments
                .iter_mut()
                .find(|a| a.id() == apartment.id())
                .ok_or(PortError::NotFound)?;
            *slot = apartment.clone();
            Ok(())
        }
    }

    fn session(role: Role) -> Session {
        Session::new(UserId::new(), "Sam".into(), "sam@example.com".into(), role)
    }

    fn draft(bedrooms: u32, price: f64) -> ApartmentDraft {
        ApartmentDraft {
            title: "Canal studio".into(),
            address: "3 Canal Row, Amsterdam".into(),
            price,
            bedrooms,
            bathrooms: 1.0,
            area: 420,
            description: "Compact studio overlooking the canal.".into(),
            images: vec!["https://img.example.com/studio.jpg".into()],
            available_from: "2024-05-01".parse().unwrap(),
            amenities: vec!["wifi".into()],
        }
    }

    fn make_service() -> ApartmentService<MockApartmentRepo> {
        ApartmentService::new(MockApartmentRepo::default())
    }

    #[tokio::test]
    async fn admin_creates_listing() {
        let svc = make_service();
        let id = svc.create(&session(Role::Admin), draft(1, 90.0)).await.unwrap();

        let found = svc.get(&id).await.unwrap();
        assert_eq!(found.title(), "Canal studio");
    }

    #[tokio::test]
    async fn guest_cannot_create_or_update() {
        let svc = make_service();
        let guest = session(Role::Guest);
        assert!(matches!(
            svc.create(&guest, draft(1, 90.0)).await,
            Err(AppError::Forbidden)
        ));

        let id = svc.create(&session(Role::Admin), draft(1, 90.0)).await.unwrap();
        assert!(matches!(
            svc.update(&guest, &id, draft(2, 90.0)).await,
            Err(AppError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_and_not_saved() {
        let svc = make_service();
        let result = svc.create(&session(Role::Admin), draft(1, 0.0)).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidApartment(_)))
        ));
        assert!(svc.apartments.apartments.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_persists_new_details() {
        let svc = make_service();
        let admin = session(Role::Admin);
        let id = svc.create(&admin, draft(1, 90.0)).await.unwrap();

        let updated = svc.update(&admin, &id, draft(2, 110.0)).await.unwrap();
        assert_eq!(updated.bedrooms(), 2);
        assert_eq!(svc.get(&id).await.unwrap().price(), 110.0);
        assert_eq!(svc.apartments.apartments.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_of_unknown_listing_creates_nothing() {
        let svc = make_service();
        let result = svc
            .update(&session(Role::Admin), &ApartmentId::new(), draft(2, 110.0))
            .await;
        assert!(matches!(result, Err(AppError::Port(PortError::NotFound))));
        assert!(svc.apartments.apartments.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let svc = make_service();
        let result = svc.get(&ApartmentId::new()).await;
        assert!(matches!(result, Err(AppError::Port(PortError::NotFound))));
    }

    #[tokio::test]
    async fn search_applies_filter() {
        let svc = make_service();
        let admin = session(Role::Admin);
        svc.create(&admin, draft(1, 90.0)).await.unwrap();
        svc.create(&admin, draft(3, 200.0)).await.unwrap();
        svc.create(&admin, draft(4, 150.0)).await.unwrap();

        let filter = ApartmentFilter {
            bedrooms: BedroomFilter::AtLeast(3),
            max_price: Some(180.0),
            ..Default::default()
        };
        let hits = svc.search(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].bedrooms(), 4);
    }
}

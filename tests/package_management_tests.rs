//! Admin package catalog management against a recording gateway

mod common;

#[cfg(test)]
mod tests {
    use travel_desk::admin::{PackageCatalog, PackageEditor, PackageError, PackageForm};
    use travel_desk::models::{Nat, Principal, TourPackage};
    use travel_desk::queries::QueryKey;

    use super::common::{admin, setup, GatewayCall};

    fn goa() -> PackageForm {
        PackageForm {
            id: "goa-3d".to_string(),
            title: "Goa Getaway".to_string(),
            description: "3 days in Goa".to_string(),
            price: "15000".to_string(),
            duration: "3".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_sends_wide_integers_and_invalidates_listing() {
        let (gateway, data) = setup();
        let catalog = PackageCatalog::new(data.clone());

        catalog.create(&admin(), goa()).await.unwrap();

        assert_eq!(
            gateway.writes(),
            vec![GatewayCall::CreatePackage {
                id: "goa-3d".to_string(),
                title: "Goa Getaway".to_string(),
                description: "3 days in Goa".to_string(),
                price: Nat::new(15000),
                duration: Nat::new(3),
            }]
        );
        assert_eq!(
            data.cache().invalidation_count(&QueryKey::PublicPackages).await,
            1
        );

        let listed = catalog.list(&Principal::anonymous()).await.unwrap().ready().unwrap();
        assert_eq!(
            listed,
            vec![TourPackage {
                id: "goa-3d".to_string(),
                title: "Goa Getaway".to_string(),
                description: "3 days in Goa".to_string(),
                price: Nat::new(15000),
                duration: Nat::new(3),
            }]
        );
    }

    #[tokio::test]
    async fn test_listing_is_cached_until_a_write() {
        let (gateway, data) = setup();
        let catalog = PackageCatalog::new(data);
        let visitor = Principal::anonymous();

        catalog.list(&visitor).await.unwrap();
        catalog.list(&visitor).await.unwrap();
        assert_eq!(
            gateway.count(|call| *call == GatewayCall::GetPublicPackages),
            1
        );

        catalog.create(&admin(), goa()).await.unwrap();
        let listed = catalog.list(&visitor).await.unwrap().ready().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(
            gateway.count(|call| *call == GatewayCall::GetPublicPackages),
            2
        );
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields_by_id() {
        let (gateway, data) = setup();
        let catalog = PackageCatalog::new(data);
        catalog.create(&admin(), goa()).await.unwrap();
        let original = catalog.list(&admin()).await.unwrap().ready().unwrap().remove(0);

        let mut editor = PackageEditor::edit(&original);
        editor.set_form(PackageForm {
            id: "ignored".to_string(),
            title: "Goa Deluxe".to_string(),
            description: "4 days in North Goa".to_string(),
            price: "21000".to_string(),
            duration: "4".to_string(),
        });
        catalog.save(&admin(), &editor).await.unwrap();

        let expected = TourPackage {
            id: "goa-3d".to_string(),
            title: "Goa Deluxe".to_string(),
            description: "4 days in North Goa".to_string(),
            price: Nat::new(21000),
            duration: Nat::new(4),
        };
        assert!(gateway.writes().contains(&GatewayCall::UpdatePackage {
            id: "goa-3d".to_string(),
            package: expected.clone(),
        }));
        let listed = catalog.list(&admin()).await.unwrap().ready().unwrap();
        assert_eq!(listed, vec![expected]);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (gateway, data) = setup();
        let catalog = PackageCatalog::new(data);
        catalog.create(&admin(), goa()).await.unwrap();
        gateway.clear();

        let refused = catalog.delete(&admin(), "goa-3d", false).await;
        assert!(matches!(refused, Err(PackageError::NotConfirmed(_))));
        assert!(gateway.writes().is_empty());

        let pending = catalog.request_delete("goa-3d");
        assert_eq!(pending.id(), "goa-3d");
        catalog.confirm_delete(&admin(), pending).await.unwrap();

        assert_eq!(
            gateway.writes(),
            vec![GatewayCall::DeletePackage {
                id: "goa-3d".to_string()
            }]
        );
        let listed = catalog.list(&admin()).await.unwrap().ready().unwrap();
        assert!(listed.iter().all(|package| package.id != "goa-3d"));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_gateway() {
        let (gateway, data) = setup();
        let catalog = PackageCatalog::new(data);

        let result = catalog
            .create(
                &admin(),
                PackageForm {
                    duration: "0".to_string(),
                    ..goa()
                },
            )
            .await;

        assert!(matches!(result, Err(PackageError::Invalid(_))));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_id_surfaces_rejection() {
        let (_gateway, data) = setup();
        let catalog = PackageCatalog::new(data);
        catalog.create(&admin(), goa()).await.unwrap();

        let result = catalog.create(&admin(), goa()).await;
        assert!(matches!(result, Err(PackageError::Gateway(_))));
    }
}

//! Admin inquiry review against a recording gateway

mod common;

#[cfg(test)]
mod tests {
    use travel_desk::admin::{detail_panel, CategoryFilter, InquiryReview, StatusSummary};
    use travel_desk::models::{
        ContactDetails, CustomerInquiry, InquiryCategory, InquiryDetails, InquiryStatus, Nat,
        Principal, RailwayBookingDetails,
    };
    use travel_desk::queries::QueryKey;

    use super::common::{admin, setup, GatewayCall};

    fn contact() -> ContactDetails {
        ContactDetails {
            name: "A".to_string(),
            phone_number: "1234567890".to_string(),
            email: "a@b.com".to_string(),
        }
    }

    fn tour(id: u128) -> CustomerInquiry {
        CustomerInquiry {
            id: Nat::new(id),
            contact: contact(),
            message: "Interested in Goa trip".to_string(),
            status: InquiryStatus::New,
            details: InquiryDetails::TourInquiry,
        }
    }

    fn railway(id: u128) -> CustomerInquiry {
        CustomerInquiry {
            id: Nat::new(id),
            contact: contact(),
            message: InquiryCategory::RailwayBooking.placeholder_message().to_string(),
            status: InquiryStatus::InProgress,
            details: InquiryDetails::RailwayBooking(RailwayBookingDetails {
                origin_station: "New Delhi".to_string(),
                destination_station: "Mumbai Central".to_string(),
                travel_date: "2026-12-01".to_string(),
                passenger_count: Nat::new(2),
                rail_class: "2A".to_string(),
            }),
        }
    }

    #[tokio::test]
    async fn test_set_status_writes_once_and_rereads() {
        let (gateway, data) = setup();
        gateway.inner().insert_inquiry(tour(42)).await;
        let review = InquiryReview::new(data.clone());

        let before = review.find(&admin(), Nat::new(42)).await.unwrap().ready().flatten();
        assert_eq!(before.map(|inquiry| inquiry.status), Some(InquiryStatus::New));

        let updated = review
            .set_status(&admin(), Nat::new(42), InquiryStatus::Resolved)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, InquiryStatus::Resolved);
        assert_eq!(
            gateway.writes(),
            vec![GatewayCall::UpdateInquiryStatus {
                id: Nat::new(42),
                status: InquiryStatus::Resolved,
            }]
        );
        assert_eq!(
            data.cache().invalidation_count(&QueryKey::AllInquiries).await,
            1
        );
        assert_eq!(
            gateway.count(|call| *call == GatewayCall::GetAllInquiries),
            2
        );
    }

    #[tokio::test]
    async fn test_any_status_reachable_from_any_other() {
        let (gateway, data) = setup();
        gateway.inner().insert_inquiry(tour(1)).await;
        let review = InquiryReview::new(data);

        for from in InquiryStatus::ALL {
            for to in InquiryStatus::ALL {
                review.set_status(&admin(), Nat::new(1), from).await.unwrap();
                let updated = review
                    .set_status(&admin(), Nat::new(1), to)
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(updated.status, to, "{:?} -> {:?}", from, to);
            }
        }
    }

    #[tokio::test]
    async fn test_listing_filters_by_category() {
        let (gateway, data) = setup();
        gateway.inner().insert_inquiry(tour(1)).await;
        gateway.inner().insert_inquiry(railway(2)).await;
        gateway.inner().insert_inquiry(tour(3)).await;
        let review = InquiryReview::new(data);

        let all = review
            .list(&admin(), CategoryFilter::All)
            .await
            .unwrap()
            .ready()
            .unwrap();
        assert_eq!(all.len(), 3);

        let summary = StatusSummary::of(&all);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.new, 2);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.resolved, 0);

        let rail = review
            .list(
                &admin(),
                CategoryFilter::Only(InquiryCategory::RailwayBooking),
            )
            .await
            .unwrap()
            .ready()
            .unwrap();
        assert_eq!(rail.len(), 1);
        assert_eq!(rail[0].id, Nat::new(2));

        // one gateway read serves every filtered view
        assert_eq!(
            gateway.count(|call| *call == GatewayCall::GetAllInquiries),
            1
        );
    }

    #[tokio::test]
    async fn test_missing_details_render_without_panel() {
        let (gateway, data) = setup();
        gateway
            .inner()
            .insert_inquiry(CustomerInquiry {
                details: InquiryDetails::Missing(InquiryCategory::HotelBooking),
                ..tour(7)
            })
            .await;
        let review = InquiryReview::new(data);

        let inquiry = review
            .find(&admin(), Nat::new(7))
            .await
            .unwrap()
            .ready()
            .flatten()
            .unwrap();

        assert_eq!(inquiry.category(), InquiryCategory::HotelBooking);
        assert!(detail_panel(&inquiry).is_none());
    }

    #[tokio::test]
    async fn test_non_admin_listing_is_rejected() {
        let (gateway, data) = setup();
        gateway.inner().insert_inquiry(tour(1)).await;
        let review = InquiryReview::new(data);

        let result = review
            .list(&Principal::new("someone-else"), CategoryFilter::All)
            .await;
        assert!(result.is_err());
    }
}

//! HTTP surface: routing, identity extractors and error mapping

mod common;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use travel_desk::auth::IdentityVerifier;
    use travel_desk::gateway::GatewaySlot;
    use travel_desk::middleware::RateLimiter;
    use travel_desk::models::{
        ContactDetails, CustomerInquiry, InquiryDetails, InquiryStatus, Nat, Principal,
    };
    use travel_desk::state::AppState;

    use super::common::{admin, GatewayCall, RecordingGateway};

    const SECRET: &str = "test-secret";

    fn app() -> (Arc<RecordingGateway>, Router) {
        let gateway = Arc::new(RecordingGateway::with_admin(&admin()));
        let state = AppState::new(
            GatewaySlot::resolved(gateway.clone()),
            IdentityVerifier::new(SECRET),
        );
        (gateway, travel_desk::app(state))
    }

    fn bearer(principal: &Principal) -> String {
        let token = IdentityVerifier::new(SECRET).issue(principal, 3600).unwrap();
        format!("Bearer {}", token)
    }

    fn request(method: Method, uri: &str, caller: Option<&Principal>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(principal) = caller {
            builder = builder.header(header::AUTHORIZATION, bearer(principal));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn tour_body() -> Value {
        json!({
            "name": "A",
            "phoneNumber": "1234567890",
            "email": "a@b.com",
            "message": "Interested in Goa trip"
        })
    }

    #[tokio::test]
    async fn test_health_reports_resolved_gateway() {
        let (_gateway, app) = app();

        let response = app
            .oneshot(request(Method::GET, "/health", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
        assert!(response.headers().contains_key("x-request-id"));
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["gateway"], "resolved");
    }

    #[tokio::test]
    async fn test_unresolved_gateway_reports_unavailable() {
        let state = AppState::new(GatewaySlot::unresolved(), IdentityVerifier::new(SECRET));
        let app = travel_desk::app(state);

        let health = app
            .clone()
            .oneshot(request(Method::GET, "/health", None, None))
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::SERVICE_UNAVAILABLE);

        let packages = app
            .oneshot(request(Method::GET, "/api/packages", None, None))
            .await
            .unwrap();
        assert_eq!(packages.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(packages).await;
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_admin_route_on_unresolved_gateway_is_unavailable() {
        let state = AppState::new(GatewaySlot::unresolved(), IdentityVerifier::new(SECRET));
        let app = travel_desk::app(state);

        let response = app
            .oneshot(request(Method::GET, "/api/admin/inquiries", Some(&admin()), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_anonymous_package_listing() {
        let (gateway, app) = app();

        let response = app
            .oneshot(request(Method::GET, "/api/packages", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], json!([]));
        assert_eq!(gateway.count(|call| *call == GatewayCall::GetPublicPackages), 1);
    }

    #[tokio::test]
    async fn test_admin_routes_require_admin_identity() {
        let (gateway, app) = app();

        let missing = app
            .clone()
            .oneshot(request(Method::GET, "/api/admin/inquiries", None, None))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(missing).await["error"]["code"], "MISSING_TOKEN");

        let stranger = Principal::new("someone-else");
        let forbidden = app
            .oneshot(request(
                Method::GET,
                "/api/admin/inquiries",
                Some(&stranger),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            forbidden.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
        assert_eq!(gateway.count(|call| *call == GatewayCall::GetAllInquiries), 0);
    }

    #[tokio::test]
    async fn test_tour_submission_created() {
        let (gateway, app) = app();

        let response = app
            .oneshot(request(
                Method::POST,
                "/api/inquiries/tour",
                None,
                Some(tour_body()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["data"]["category"], "tourInquiry");
        assert_eq!(
            gateway.writes(),
            vec![GatewayCall::SubmitTourInquiry {
                name: "A".to_string(),
                phone: "1234567890".to_string(),
                email: "a@b.com".to_string(),
                message: "Interested in Goa trip".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_submissions_throttled_per_client() {
        let gateway = Arc::new(RecordingGateway::with_admin(&admin()));
        let state = AppState::new(
            GatewaySlot::resolved(gateway.clone()),
            IdentityVerifier::new(SECRET),
        )
        .with_submission_limiter(RateLimiter::new(1, 2));
        let app = travel_desk::app(state);

        let from = |client: &str| {
            let mut req = request(Method::POST, "/api/inquiries/tour", None, Some(tour_body()));
            req.headers_mut()
                .insert("x-forwarded-for", client.parse().unwrap());
            req
        };

        for _ in 0..2 {
            let response = app.clone().oneshot(from("203.0.113.7")).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let throttled = app.clone().oneshot(from("203.0.113.7")).await.unwrap();
        assert_eq!(throttled.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(throttled.headers().contains_key(header::RETRY_AFTER));
        let body = json_body(throttled).await;
        assert_eq!(body["error"]["code"], "RATE_LIMITED");

        let other = app.clone().oneshot(from("198.51.100.2")).await.unwrap();
        assert_eq!(other.status(), StatusCode::CREATED);

        let listing = app
            .oneshot(request(Method::GET, "/api/packages", None, None))
            .await
            .unwrap();
        assert_eq!(listing.status(), StatusCode::OK);
        assert_eq!(gateway.writes().len(), 3);
    }

    #[tokio::test]
    async fn test_round_trip_flight_without_return_date_is_bad_request() {
        let (gateway, app) = app();

        let response = app
            .oneshot(request(
                Method::POST,
                "/api/inquiries/flight",
                None,
                Some(json!({
                    "name": "A",
                    "phoneNumber": "1234567890",
                    "email": "a@b.com",
                    "originCity": "Delhi",
                    "destinationCity": "Goa",
                    "departureDate": "2026-12-01",
                    "tripType": "round-trip",
                    "passengerCount": "2",
                    "cabinClass": "economy"
                })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_submission_returns_retry_prompt() {
        let (gateway, app) = app();
        gateway.fail_writes(true);

        let response = app
            .oneshot(request(
                Method::POST,
                "/api/inquiries/tour",
                None,
                Some(tour_body()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "GATEWAY_REJECTED");
        assert_eq!(
            body["error"]["message"],
            travel_desk::inquiry::RETRY_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_package_lifecycle_over_http() {
        let (gateway, app) = app();
        let admin = admin();

        let created = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/admin/packages",
                Some(&admin),
                Some(json!({
                    "id": "goa-3d",
                    "title": "Goa Getaway",
                    "description": "3 days in Goa",
                    "price": "15000",
                    "duration": "3"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = json_body(created).await;
        assert_eq!(body["data"]["price"], "15000");

        let unconfirmed = app
            .clone()
            .oneshot(request(
                Method::DELETE,
                "/api/admin/packages/goa-3d",
                Some(&admin),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(unconfirmed.status(), StatusCode::BAD_REQUEST);
        assert!(!gateway
            .writes()
            .iter()
            .any(|call| matches!(call, GatewayCall::DeletePackage { .. })));

        let confirmed = app
            .clone()
            .oneshot(request(
                Method::DELETE,
                "/api/admin/packages/goa-3d?confirm=true",
                Some(&admin),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(confirmed.status(), StatusCode::NO_CONTENT);

        let listing = app
            .oneshot(request(Method::GET, "/api/packages", None, None))
            .await
            .unwrap();
        assert_eq!(json_body(listing).await["data"], json!([]));
    }

    #[tokio::test]
    async fn test_status_update_returns_reread_entry() {
        let (gateway, app) = app();
        gateway
            .inner()
            .insert_inquiry(CustomerInquiry {
                id: Nat::new(42),
                contact: ContactDetails {
                    name: "A".to_string(),
                    phone_number: "1234567890".to_string(),
                    email: "a@b.com".to_string(),
                },
                message: "Interested in Goa trip".to_string(),
                status: InquiryStatus::New,
                details: InquiryDetails::TourInquiry,
            })
            .await;

        let response = app
            .clone()
            .oneshot(request(
                Method::PUT,
                "/api/admin/inquiries/42/status",
                Some(&admin()),
                Some(json!({ "status": "resolved" })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["inquiry"]["status"], "resolved");
        assert_eq!(body["data"]["categoryLabel"], "Tour Inquiry");
        assert!(body["data"]["panel"].is_null());
        assert!(gateway.writes().contains(&GatewayCall::UpdateInquiryStatus {
            id: Nat::new(42),
            status: InquiryStatus::Resolved,
        }));

        let bad_id = app
            .oneshot(request(
                Method::GET,
                "/api/admin/inquiries/abc",
                Some(&admin()),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_incoming_request_id_is_echoed() {
        let (_gateway, app) = app();
        let mut req = request(Method::GET, "/api/packages", None, None);
        req.headers_mut()
            .insert("x-request-id", "req-123".parse().unwrap());

        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.headers().get("x-request-id").unwrap(), "req-123");
    }

    #[tokio::test]
    async fn test_expired_token_is_distinguished() {
        let (_gateway, app) = app();
        let expired = IdentityVerifier::new(SECRET)
            .issue(&Principal::new("traveller"), -3600)
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/profile")
                    .header(header::AUTHORIZATION, format!("Bearer {}", expired))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"]["code"], "TOKEN_EXPIRED");
    }

    #[tokio::test]
    async fn test_profile_setup_and_role() {
        let (_gateway, app) = app();
        let traveller = Principal::new("traveller");

        let before = app
            .clone()
            .oneshot(request(Method::GET, "/api/profile", Some(&traveller), None))
            .await
            .unwrap();
        assert_eq!(before.status(), StatusCode::OK);
        let body = json_body(before).await;
        assert_eq!(body["data"]["setupRequired"], true);

        let saved = app
            .clone()
            .oneshot(request(
                Method::PUT,
                "/api/profile",
                Some(&traveller),
                Some(json!({ "name": "  Asha " })),
            ))
            .await
            .unwrap();
        assert_eq!(saved.status(), StatusCode::OK);
        assert_eq!(json_body(saved).await["data"]["name"], "Asha");

        let after = app
            .clone()
            .oneshot(request(Method::GET, "/api/profile", Some(&traveller), None))
            .await
            .unwrap();
        let body = json_body(after).await;
        assert_eq!(body["data"]["setupRequired"], false);
        assert_eq!(body["data"]["profile"]["name"], "Asha");

        let role = app
            .oneshot(request(Method::GET, "/api/me/role", Some(&traveller), None))
            .await
            .unwrap();
        let body = json_body(role).await;
        assert_eq!(body["data"]["role"], "user");
        assert_eq!(body["data"]["isAdmin"], false);
    }
}

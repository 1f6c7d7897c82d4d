use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use propx_core::{Error, PropertyRecord};
use propx_engine::QueryFacade;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct RecommendQuery {
    property_id: String,
    #[serde(default = "default_top_n")]
    top_n: usize,
}

fn default_top_n() -> usize {
    5
}

#[derive(Deserialize)]
struct LocationSearchQuery {
    location: String,
    radius_km: f64,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(facade: Arc<QueryFacade>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(facade.clone()))
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/predict_price", web::post().to(predict_price))
        .route("/api/options", web::get().to(get_options))
        .route("/api/stats", web::get().to(get_stats))
        .route("/api/health", web::get().to(health_check))
        .route(
            "/api/recommender/options",
            web::get().to(get_recommender_options),
        )
        .route(
            "/api/recommender/recommend",
            web::get().to(recommend_properties),
        )
        .route(
            "/api/recommender/location-search",
            web::get().to(location_search),
        );
}

/// Error kind to status code: unavailable 503, unknown 404, invalid 400,
/// prediction 422, anything load-time-only 500.
fn error_response(error: &Error) -> HttpResponse {
    let body = serde_json::json!({
        "error": error.to_string(),
        "kind": error.kind(),
    });
    match error {
        Error::ArtifactUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),
        Error::UnknownProperty(_) | Error::UnknownLocation(_) => {
            HttpResponse::NotFound().json(body)
        }
        Error::InvalidParameter(_) => HttpResponse::BadRequest().json(body),
        Error::Prediction(_) => HttpResponse::UnprocessableEntity().json(body),
        Error::Artifact(_) | Error::Io(_) => HttpResponse::InternalServerError().json(body),
    }
}

async fn predict_price(
    facade: web::Data<Arc<QueryFacade>>,
    req: web::Json<PropertyRecord>,
) -> ActixResult<HttpResponse> {
    match facade.predict(&req) {
        Ok(prediction) => Ok(HttpResponse::Ok().json(prediction)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn get_options(facade: web::Data<Arc<QueryFacade>>) -> ActixResult<HttpResponse> {
    match facade.options() {
        Ok(options) => Ok(HttpResponse::Ok().json(options)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn get_stats(facade: web::Data<Arc<QueryFacade>>) -> ActixResult<HttpResponse> {
    match facade.stats() {
        Ok(stats) => Ok(HttpResponse::Ok().json(stats)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn health_check(facade: web::Data<Arc<QueryFacade>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "propX",
        "version": env!("CARGO_PKG_VERSION"),
        "subsystems": facade.availability(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

async fn get_recommender_options(
    facade: web::Data<Arc<QueryFacade>>,
) -> ActixResult<HttpResponse> {
    match facade.recommender_options() {
        Ok(options) => Ok(HttpResponse::Ok().json(options)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn recommend_properties(
    facade: web::Data<Arc<QueryFacade>>,
    query: web::Query<RecommendQuery>,
) -> ActixResult<HttpResponse> {
    match facade.recommend(&query.property_id, query.top_n) {
        Ok(results) => Ok(HttpResponse::Ok().json(results)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn location_search(
    facade: web::Data<Arc<QueryFacade>>,
    query: web::Query<LocationSearchQuery>,
) -> ActixResult<HttpResponse> {
    match facade.search_radius(&query.location, query.radius_km) {
        Ok(results) => Ok(HttpResponse::Ok().json(results)),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use ahash::AHashMap;
    use propx_artifacts::{ArtifactStore, CategoryEncoder, LinearModel, ValuationPipeline};
    use propx_core::{
        ColumnSpec, DistanceTable, FeatureSchema, PropertyTable, PropertyType, SimilarityMatrix,
    };

    fn record() -> PropertyRecord {
        PropertyRecord {
            property_type: PropertyType::Flat,
            sector: "sector 45".to_string(),
            bedrooms: 3.0,
            bathrooms: 2.0,
            balcony: "2".to_string(),
            property_age: "Relatively New".to_string(),
            built_up_area: 1650.0,
            servant_room: 0.0,
            store_room: 0.0,
            furnishing_type: "semifurnished".to_string(),
            luxury_category: "Medium".to_string(),
            floor_category: "Mid Floor".to_string(),
        }
    }

    fn facade() -> Arc<QueryFacade> {
        let schema = FeatureSchema::new(vec![
            ColumnSpec::categorical("sector"),
            ColumnSpec::numeric("built_up_area"),
        ]);
        let mut encoders = AHashMap::new();
        encoders.insert(
            "sector".to_string(),
            CategoryEncoder::new([("sector 45".to_string(), 0.9)].into_iter().collect()),
        );
        let model = LinearModel {
            intercept: 0.3,
            weights: vec![0.5, 0.0002],
        };
        let pipeline = ValuationPipeline::new(schema, encoders, model).unwrap();

        let distances = DistanceTable::new(
            vec!["P1".to_string(), "P2".to_string(), "P3".to_string()],
            vec!["Loc_A".to_string()],
            vec![500.0, 1500.0, 2000.0],
        )
        .unwrap();
        let sim = SimilarityMatrix::new(
            3,
            vec![1.0, 0.9, 0.4, 0.9, 1.0, 0.7, 0.4, 0.7, 1.0],
            None,
        )
        .unwrap();

        Arc::new(QueryFacade::new(Arc::new(ArtifactStore::from_parts(
            Some(PropertyTable::new(vec![record()])),
            Some(pipeline),
            Some(distances),
            Some([sim.clone(), sim.clone(), sim]),
        ))))
    }

    macro_rules! test_app {
        ($facade:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($facade))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_predict_price_ok() {
        let app = test_app!(facade());
        let req = test::TestRequest::post()
            .uri("/api/predict_price")
            .set_json(record())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["low"].as_f64().unwrap() <= body["high"].as_f64().unwrap());
        assert!(body["formatted_range"].as_str().unwrap().contains("Cr"));
    }

    #[actix_web::test]
    async fn test_predict_price_unseen_category_is_422() {
        let app = test_app!(facade());
        let mut bad = record();
        bad.sector = "sector 999".to_string();
        let req = test::TestRequest::post()
            .uri("/api/predict_price")
            .set_json(bad)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "prediction_failure");
    }

    #[actix_web::test]
    async fn test_recommend_ok() {
        let app = test_app!(facade());
        let req = test::TestRequest::get()
            .uri("/api/recommender/recommend?property_id=P1&top_n=2")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["property_id"], "P2");
    }

    #[actix_web::test]
    async fn test_recommend_unknown_property_is_404() {
        let app = test_app!(facade());
        let req = test::TestRequest::get()
            .uri("/api/recommender/recommend?property_id=P99")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_location_search_strict_boundary() {
        let app = test_app!(facade());
        let req = test::TestRequest::get()
            .uri("/api/recommender/location-search?location=Loc_A&radius_km=1.5")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let results = body.as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["property_id"], "P1");
        assert_eq!(results[0]["distance_km"], 0.5);
    }

    #[actix_web::test]
    async fn test_location_search_bad_radius_is_400() {
        let app = test_app!(facade());
        let req = test::TestRequest::get()
            .uri("/api/recommender/location-search?location=Loc_A&radius_km=0")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_degraded_recommend_is_503() {
        let facade = Arc::new(QueryFacade::new(Arc::new(ArtifactStore::from_parts(
            None, None, None, None,
        ))));
        let app = test_app!(facade);
        let req = test::TestRequest::get()
            .uri("/api/recommender/recommend?property_id=P1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "artifact_unavailable");
    }

    #[actix_web::test]
    async fn test_health_reports_per_engine_availability() {
        let app = test_app!(facade());
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["subsystems"]["valuation"], true);
        assert_eq!(body["subsystems"]["recommendation"], true);
    }

    #[actix_web::test]
    async fn test_options_ok() {
        let app = test_app!(facade());
        let req = test::TestRequest::get().uri("/api/options").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["sector"][0], "sector 45");
    }
}

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use waitrank_core::{CandidateId, Coordinate, Error};
use waitrank_ranking::RankingResponse;
use waitrank_storage::PopulationStore;

/// Largest accepted `PUT /patients` body.
const MAX_PAYLOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Deserialize)]
struct PatientsQuery {
    location: Option<String>,
    k: Option<usize>,
    #[serde(default)]
    explain: bool,
}

#[derive(Serialize)]
struct RejectedInfo {
    index: usize,
    error: String,
}

#[derive(Serialize)]
struct LoadResponse {
    loaded: usize,
    rejected: Vec<RejectedInfo>,
}

#[derive(Serialize)]
struct PopulationInfo {
    loaded: bool,
    count: usize,
    unscored: usize,
    rejected: usize,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(store: Arc<PopulationStore>, port: u16) -> std::io::Result<()> {
        info!("Binding REST API to 0.0.0.0:{}", port);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(store.clone()))
                .configure(Self::routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Register every endpoint; expects `web::Data<Arc<PopulationStore>>` app data.
    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::JsonConfig::default().limit(MAX_PAYLOAD_BYTES))
            .route("/", web::get().to(usage))
            .route("/patients", web::get().to(top_patients))
            .route("/patients", web::put().to(replace_patients))
            .route("/population", web::get().to(population_info));
    }
}

fn error_response(error: &Error) -> HttpResponse {
    let body = serde_json::json!({
        "error": error.to_string()
    });
    match error {
        Error::InvalidLocation(_) | Error::Validation(_) => HttpResponse::BadRequest().json(body),
        Error::EmptyPopulation { .. } => HttpResponse::UnprocessableEntity().json(body),
        Error::InternalRanking(_) | Error::Io(_) | Error::Serialization(_) => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

async fn usage() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "usage": "GET /patients?location=<latitude>,<longitude>[&k=<n>][&explain=true]"
    })))
}

async fn top_patients(
    store: web::Data<Arc<PopulationStore>>,
    query: web::Query<PatientsQuery>,
) -> ActixResult<HttpResponse> {
    let Some(location) = query.location.as_deref() else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Missing 'location' query parameter"
        })));
    };

    let coordinate: Coordinate = match location.parse() {
        Ok(c) => c,
        Err(e) => return Ok(error_response(&Error::InvalidLocation(e))),
    };

    let Some(population) = store.current() else {
        return Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "No population loaded"
        })));
    };

    let ranker = store.ranker();
    let k = query.k.unwrap_or(ranker.config().default_k);
    let mut rng = StdRng::from_os_rng();
    let ranked = ranker.rank(&population, &coordinate, k, &mut rng);
    debug!("Ranked {} of {} candidates for {}", ranked.len(), population.len(), location);

    if query.explain {
        return Ok(HttpResponse::Ok().json(RankingResponse::from_ranked(ranked, population.len())));
    }

    let ids: Vec<CandidateId> = ranked.into_iter().map(|c| c.id).collect();
    Ok(HttpResponse::Ok().json(ids))
}

async fn replace_patients(
    store: web::Data<Arc<PopulationStore>>,
    records: web::Json<Vec<serde_json::Value>>,
) -> ActixResult<HttpResponse> {
    match store.load_values(records.into_inner()) {
        Ok(population) => Ok(HttpResponse::Ok().json(LoadResponse {
            loaded: population.len(),
            rejected: population
                .rejected()
                .iter()
                .map(|r| RejectedInfo {
                    index: r.index,
                    error: r.error.to_string(),
                })
                .collect(),
        })),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn population_info(store: web::Data<Arc<PopulationStore>>) -> ActixResult<HttpResponse> {
    let info = match store.current() {
        Some(population) => PopulationInfo {
            loaded: true,
            count: population.len(),
            unscored: population.unscored_count(),
            rejected: population.rejected().len(),
        },
        None => PopulationInfo {
            loaded: false,
            count: 0,
            unscored: 0,
            rejected: 0,
        },
    };
    Ok(HttpResponse::Ok().json(info))
}

use crate::{
    api::{engagement, performance},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = (60_000 / requests_per_min as u64).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("rate limit period and burst are non-zero");
        Governor::new(&cfg)
    }

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            // authentication
            .wrap(build_limiter(config.rate_protected_per_min)) // rate limiting
            .service(
                web::scope("/admin")
                    // /admin/performance
                    .service(
                        web::resource("/performance")
                            .route(web::get().to(performance::performance)),
                    )
                    // /admin/performance/{user_id}
                    .service(
                        web::resource("/performance/{user_id}")
                            .route(web::get().to(performance::user_performance)),
                    )
                    // /admin/engagement-score/{user_id}
                    .service(
                        web::resource("/engagement-score/{user_id}")
                            .route(web::get().to(engagement::engagement_score)),
                    ),
            ),
    );
}

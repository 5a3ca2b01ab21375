use crate::analytics::PerformanceResult;
use crate::analytics::engagement::EngagementScore;
use crate::analytics::score::{CallCounts, PerformanceStatus, SessionDetail};
use crate::analytics::work_time::DaySummary;
use crate::api::engagement::EngagementResponse;
use crate::api::performance::{PerformanceResponse, UserPerformanceResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Callwatch Analytics API",
        version = "1.0.0",
        description = r#"
## Call-center activity analytics

Read-only analytics over attendance check-ins and synced call logs.

### 🔹 Key Features
- **Activity performance**
  - Daily sessions are rebuilt from check-in/check-out rows
  - Time between calls is classified as active (≤ 10 min) or inactive
  - The lunch window is excluded from gaps; one hour is deducted from every session
  - Ratio of active to work time, tiered as Excellent / Moderate / Poor / Inactive
- **Engagement score**
  - Separate punctuality and answer-rate blend, not to be confused with the ratio

### 🔐 Security
All endpoints require an **admin JWT Bearer token** issued by the account service.
Results are limited to the admin's own users.

### 📦 Response Format
- JSON; results are recomputed on every request and never stored
"#,
    ),
    paths(
        crate::api::performance::performance,
        crate::api::performance::user_performance,
        crate::api::engagement::engagement_score
    ),
    components(
        schemas(
            PerformanceResponse,
            UserPerformanceResponse,
            PerformanceResult,
            PerformanceStatus,
            SessionDetail,
            CallCounts,
            DaySummary,
            EngagementResponse,
            EngagementScore
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Performance", description = "Activity performance analytics"),
        (name = "Engagement", description = "Punctuality and answer-rate score"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

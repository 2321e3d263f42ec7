//! User HTTP handlers.
//!
//! ```text
//! POST /users/setIsActive {"user_id":"u2","is_active":false}
//! GET /users/getReview?user_id=u2
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::SetUserActiveRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::deadline::with_deadline;
use crate::inbound::http::dto::{ReviewQueueBody, UserBody};
use crate::inbound::http::schemas::ErrorResponseSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /users/setIsActive`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SetIsActiveRequest {
    #[schema(example = "u2")]
    pub user_id: String,
    pub is_active: bool,
}

impl From<SetIsActiveRequest> for SetUserActiveRequest {
    fn from(value: SetIsActiveRequest) -> Self {
        Self {
            user_id: value.user_id,
            is_active: value.is_active,
        }
    }
}

/// Response payload for `POST /users/setIsActive`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: UserBody,
}

/// Query parameters for `GET /users/getReview`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct UserIdQuery {
    /// Reviewer whose queue is requested.
    pub user_id: String,
}

/// Mark a user as available or unavailable for review.
#[utoipa::path(
    post,
    path = "/users/setIsActive",
    request_body = SetIsActiveRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponseSchema),
        (status = 404, description = "Unknown user", body = ErrorResponseSchema),
        (status = 503, description = "Store unavailable", body = ErrorResponseSchema)
    ),
    tags = ["users"],
    operation_id = "setUserActive"
)]
#[post("/users/setIsActive")]
pub async fn set_is_active(
    state: web::Data<HttpState>,
    payload: web::Json<SetIsActiveRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let request = SetUserActiveRequest::from(payload.into_inner());
    let membership =
        with_deadline(state.request_timeout, state.users.set_user_active(request)).await?;
    Ok(web::Json(UserResponse {
        user: UserBody::from(membership),
    }))
}

/// List open and merged pull requests a user reviews.
#[utoipa::path(
    get,
    path = "/users/getReview",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Review queue", body = ReviewQueueBody),
        (status = 400, description = "Invalid request", body = ErrorResponseSchema),
        (status = 404, description = "Unknown user or empty queue", body = ErrorResponseSchema),
        (status = 503, description = "Store unavailable", body = ErrorResponseSchema)
    ),
    tags = ["users"],
    operation_id = "getReviewQueue"
)]
#[get("/users/getReview")]
pub async fn get_review(
    state: web::Data<HttpState>,
    query: web::Query<UserIdQuery>,
) -> ApiResult<HttpResponse> {
    let UserIdQuery { user_id } = query.into_inner();
    let queue = with_deadline(state.request_timeout, state.review_queue.review_queue(user_id)).await?;
    Ok(HttpResponse::Ok().json(ReviewQueueBody::from(queue)))
}

#[cfg(test)]
mod tests;

//! Quote request handlers.
//!
//! # Responsibility
//! - Check the request session before touching storage.
//! - Open one scoped connection per request and run one service call on it.
//! - Map service outcomes onto HTTP-equivalent response envelopes.
//!
//! # Invariants
//! - Handlers never panic; every failure becomes an `ApiResponse`.
//! - Storage failures are logged here and surface as a generic server error.

use crate::config::ApiConfig;
use crate::context::{RequestContext, Session};
use crate::response::ApiResponse;
use log::{error, info, warn};
use quotebook_core::db::open_db;
use quotebook_core::{
    FieldErrors, OrderNumber, QuotePayload, QuoteService, QuoteServiceError, RepoError,
    ServiceResult, SqliteQuoteRepository,
};
use serde::Serialize;
use serde_json::{json, Value};

const INVALID_CREDENTIALS: &str = "Credenziali non valide";

#[derive(Serialize)]
struct ValidationBody<'a> {
    errors: &'a FieldErrors,
}

/// Handler set bound to one configuration.
#[derive(Debug, Clone)]
pub struct QuoteApi {
    config: ApiConfig,
}

impl QuoteApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Checks credentials and returns an authenticated request context.
    ///
    /// Rejections carry a `401` response ready to send back.
    pub fn login(&self, name: &str, password: &str) -> Result<RequestContext, ApiResponse> {
        if name == self.config.username && password == self.config.password {
            info!("event=login module=api status=ok");
            return Ok(RequestContext::new(Session::authenticated(name)));
        }

        warn!("event=login module=api status=rejected");
        Err(ApiResponse::error(ApiResponse::UNAUTHORIZED, INVALID_CREDENTIALS))
    }

    /// `GET /api/quotes?q=`: summaries, newest first.
    pub fn list_quotes(&self, ctx: &RequestContext, query: Option<&str>) -> ApiResponse {
        if !ctx.is_authenticated() {
            return ApiResponse::unauthorized();
        }

        match self.with_service("quote_list", |service| service.list_quotes(query)) {
            Ok(items) => ApiResponse::json(ApiResponse::OK, &items),
            Err(err) => error_response("quote_list", err),
        }
    }

    /// `GET /api/autocomplete?q=`: name suggestions.
    ///
    /// Anonymous callers get an empty list rather than `401`.
    pub fn autocomplete(&self, ctx: &RequestContext, query: Option<&str>) -> ApiResponse {
        if !ctx.is_authenticated() {
            return ApiResponse::new(ApiResponse::OK, json!([]));
        }

        let term = query.unwrap_or_default();
        match self.with_service("quote_autocomplete", |service| service.autocomplete(term)) {
            Ok(names) => ApiResponse::json(ApiResponse::OK, &names),
            Err(err) => error_response("quote_autocomplete", err),
        }
    }

    /// `GET /api/quote/<n>`: full record as a flat object.
    pub fn get_quote(&self, ctx: &RequestContext, order_number: OrderNumber) -> ApiResponse {
        if !ctx.is_authenticated() {
            return ApiResponse::unauthorized();
        }

        match self.with_service("quote_get", |service| service.get_quote(order_number)) {
            Ok(quote) => ApiResponse::json(ApiResponse::OK, &quote),
            Err(err) => error_response("quote_get", err),
        }
    }

    /// `POST /api/quote`: validates and creates a quote.
    pub fn create_quote(&self, ctx: &RequestContext, body: &Value) -> ApiResponse {
        if !ctx.is_authenticated() {
            return ApiResponse::unauthorized();
        }

        let payload = QuotePayload::from_json(body);
        match self.with_service("quote_create", |service| service.create_quote(&payload)) {
            Ok(order_number) => ApiResponse::new(
                ApiResponse::CREATED,
                json!({ "order_number": order_number }),
            ),
            Err(err) => error_response("quote_create", err),
        }
    }

    /// `PUT /api/quote/<n>`: validates and applies supplied fields.
    pub fn update_quote(
        &self,
        ctx: &RequestContext,
        order_number: OrderNumber,
        body: &Value,
    ) -> ApiResponse {
        if !ctx.is_authenticated() {
            return ApiResponse::unauthorized();
        }

        let payload = QuotePayload::from_json(body);
        match self.with_service("quote_update", |service| {
            service.update_quote(order_number, &payload)
        }) {
            Ok(updated) => ApiResponse::new(ApiResponse::OK, json!({ "updated": updated })),
            Err(err) => error_response("quote_update", err),
        }
    }

    /// `DELETE /api/quote/<n>`: hard delete.
    pub fn delete_quote(&self, ctx: &RequestContext, order_number: OrderNumber) -> ApiResponse {
        if !ctx.is_authenticated() {
            return ApiResponse::unauthorized();
        }

        match self.with_service("quote_delete", |service| service.delete_quote(order_number)) {
            Ok(deleted) => ApiResponse::new(ApiResponse::OK, json!({ "deleted": deleted })),
            Err(err) => error_response("quote_delete", err),
        }
    }

    // The connection is dropped when this returns, on success and failure.
    fn with_service<T>(
        &self,
        event: &str,
        f: impl FnOnce(&QuoteService<SqliteQuoteRepository<'_>>) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let conn = open_db(&self.config.db_path).map_err(|err| {
            error!("event={event} module=api status=error error_code=db_open_failed error={err}");
            QuoteServiceError::Repo(RepoError::Db(err))
        })?;
        let repo = SqliteQuoteRepository::try_new(&conn)?;
        let service = QuoteService::new(repo);
        f(&service)
    }
}

fn error_response(event: &str, err: QuoteServiceError) -> ApiResponse {
    match err {
        QuoteServiceError::Validation(errors) => {
            ApiResponse::json(ApiResponse::BAD_REQUEST, &ValidationBody { errors: &errors })
        }
        QuoteServiceError::NotFound(_) => ApiResponse::not_found(),
        QuoteServiceError::Repo(err) => {
            error!("event={event} module=api status=error error_code=storage_failed error={err}");
            ApiResponse::server_error()
        }
    }
}

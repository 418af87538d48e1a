//! Fund API endpoints.
//!
//! Adapts a [`FundRepository`] to the `fund` JSON-API resource.

use api_types::{
    document::Document,
    fund::{FundDocument, FundList, FundNew, FundResource, RESOURCE_TYPE},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
};
use engine::{Currency, CurrencyError, EngineError, normalize_fund_name};
use serde_json::Value;

use crate::{JsonApi, ServerError, server::ServerState};

fn parse_fund_id(id: &str) -> Result<i32, ServerError> {
    id.parse()
        .map_err(|_| EngineError::KeyNotFound(format!("fund {id}")).into())
}

/// Handle requests for listing every fund
pub async fn list(State(state): State<ServerState>) -> Result<JsonApi<FundList>, ServerError> {
    let funds = state.funds.all().await?;
    tracing::debug!("listing {} funds", funds.len());

    Ok(JsonApi(Document {
        data: funds.iter().map(FundResource::from).collect(),
    }))
}

/// Handle requests for creating a new fund
///
/// Nothing is stored unless both attributes are present and valid.
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<FundNew>, JsonRejection>,
) -> Result<(StatusCode, [(axum::http::HeaderName, String); 1], JsonApi<FundDocument>), ServerError>
{
    let Json(payload) = payload.map_err(ServerError::Document)?;
    let resource = payload.data;
    if resource.kind != RESOURCE_TYPE {
        return Err(ServerError::TypeMismatch(resource.kind));
    }
    if resource.id.is_some() {
        return Err(ServerError::ClientId);
    }

    let name = resource
        .attributes
        .name
        .ok_or(ServerError::MissingAttribute("name"))?;
    let currency = resource
        .attributes
        .currency
        .ok_or(ServerError::MissingAttribute("currency"))?;

    // The repository checks the name again; checking here reports a bad name
    // against its own attribute before the currency is looked at.
    let name = match name {
        Value::String(name) => normalize_fund_name(&name)?,
        other => {
            return Err(EngineError::InvalidName(format!(
                "fund name must be a string, not {other}"
            ))
            .into());
        }
    };
    let currency: Currency = match currency {
        Value::String(code) => code.parse().map_err(EngineError::from)?,
        other => return Err(EngineError::from(CurrencyError::Malformed(other.to_string())).into()),
    };

    let fund = state.funds.create(&name, currency).await?;
    tracing::info!("created fund {} '{}' in {}", fund.id, fund.name, fund.currency);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/v1/fund/{}", fund.id))],
        JsonApi(Document {
            data: FundResource::from(&fund),
        }),
    ))
}

/// Handle requests for a single fund
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<JsonApi<FundDocument>, ServerError> {
    let fund = state.funds.get(parse_fund_id(&id)?).await?;

    Ok(JsonApi(Document {
        data: FundResource::from(&fund),
    }))
}

/// Handle requests for deleting a fund
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let id = parse_fund_id(&id)?;
    state.funds.delete(id).await?;
    tracing::info!("deleted fund {id}");

    Ok(StatusCode::NO_CONTENT)
}

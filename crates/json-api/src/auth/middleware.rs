//! Optional bearer-token authentication.
//!
//! A valid token places a [`Principal`](storefront_app::auth::Principal) in the
//! depot. Anything else lets the request through unauthenticated; handlers
//! decide whether that is acceptable.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::debug;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Some(token) = extract_bearer_token(req) {
        let verified = match depot.obtain_or_500::<Arc<State>>() {
            Ok(state) => state.app.auth.verify_token(token),
            Err(error) => {
                res.render(error);

                return;
            }
        };

        match verified {
            Ok(principal) => {
                debug!(username = %principal.username, role = %principal.role, "authenticated request");

                depot.insert_principal(principal);
            }
            Err(error) => debug!("continuing unauthenticated: {error}"),
        }
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

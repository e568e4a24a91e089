//! User routes - binding plain functions into dispatchable routes.
//!
//! This example demonstrates:
//! - Configuring the binder with a session provider and an identifier type
//! - Binding handlers whose signatures declare what they need
//! - Dispatching simulated requests and printing the response envelopes
//!
//! Run with `cargo run --example users`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use routebind::{
    schema_newtype, schema_record, Binder, Request, RequestContext, StaticSessionProvider,
};

#[derive(Debug, Error)]
#[error("{0}")]
struct ApiError(String);

/// Binder-wide identifier type: a bare `UserId` parameter resolves from
/// path `id`, query `id` or body `id`, in that order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
struct UserId(i64);
schema_newtype!(UserId => Int);

/// Session-bound caller identity; never read from the request payload.
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
struct Caller {
    name: String,
}
schema_record!(Caller { name: String => "name" });

#[derive(Serialize, Deserialize, Default, Debug)]
struct UpdateUserReq {
    name: String,
    age: i64,
    active: bool,
}
schema_record!(UpdateUserReq {
    name: String => "name",
    age: i64 => "age",
    active: bool => "active",
});

#[derive(Serialize, Deserialize, Default, Debug)]
struct UserView {
    id: i64,
    name: String,
    tags: Option<Vec<String>>,
}
schema_record!(UserView {
    id: i64 => "id",
    name: String => "name",
    tags: Option<Vec<String>> => "tags",
});

fn get_user(id: UserId) -> Result<UserView, ApiError> {
    Ok(UserView {
        id: id.0,
        name: "ada".to_string(),
        // normalized to [] in the response
        tags: None,
    })
}

fn update_user(ctx: RequestContext, req: UpdateUserReq) -> Result<UserView, ApiError> {
    println!("  {} {} -> {:?}", ctx.method(), ctx.path(), req);
    Ok(UserView {
        id: 1,
        name: req.name,
        tags: Some(vec!["updated".to_string()]),
    })
}

fn whoami(caller: Caller) -> Result<String, ApiError> {
    Ok(caller.name)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let provider = StaticSessionProvider::new().with(
        "caller",
        Caller {
            name: "alice".to_string(),
        },
    );

    let binder = Binder::builder()
        .session_provider(provider)
        .id_type::<UserId>()
        .build()?;

    let get_route = binder.bind(get_user)?;
    let update_route = binder.bind(update_user)?;
    let whoami_route = binder.bind(whoami)?;

    // GET /user/:id
    let response = get_route.handle(Request::new("GET", "/user/42").with_path_param("id", "42"));
    println!("GET /user/42 -> {}", String::from_utf8_lossy(response.body()));

    // POST /user with body, query overriding one field
    let response = update_route.handle(
        Request::new("POST", "/user")
            .with_body(&br#"{"name":"ada","age":36}"#[..])
            .with_query("active", "true"),
    );
    println!("POST /user   -> {}", String::from_utf8_lossy(response.body()));

    // GET /whoami bound entirely from the session
    let response = whoami_route.handle(Request::new("GET", "/whoami"));
    println!("GET /whoami  -> {}", String::from_utf8_lossy(response.body()));

    Ok(())
}

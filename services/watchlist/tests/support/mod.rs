//! Shared helpers for driving the router over an in-memory store

#![allow(dead_code)]

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;
use watchlist::{
    models::{GenreFilter, NewShow, NewUser, Show, User},
    repositories::{ShowRepository, UserRepository},
    routes::create_router,
    state::AppState,
};

#[derive(Default)]
struct Tables {
    shows: Vec<Show>,
    users: Vec<User>,
    /// (user_id, show_id)
    links: BTreeSet<(Uuid, Uuid)>,
}

/// Both repositories over shared in-process tables
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn link_count(&self) -> usize {
        self.tables.lock().unwrap().links.len()
    }
}

#[async_trait]
impl ShowRepository for MemoryStore {
    async fn find_all(&self) -> DatabaseResult<Vec<Show>> {
        Ok(self.tables.lock().unwrap().shows.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Show>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.shows.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_genre(&self, filter: &GenreFilter) -> DatabaseResult<Vec<Show>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .shows
            .iter()
            .filter(|s| filter.matches(&s.genre))
            .cloned()
            .collect())
    }

    async fn create(&self, new_show: &NewShow) -> DatabaseResult<Show> {
        let show = Show::from_new(new_show);
        self.tables.lock().unwrap().shows.push(show.clone());
        Ok(show)
    }

    async fn save(&self, show: &Show) -> DatabaseResult<Show> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .shows
            .iter_mut()
            .find(|s| s.id == show.id)
            .ok_or_else(|| DatabaseError::Query(sqlx::Error::RowNotFound))?;
        *stored = Show {
            updated_at: Utc::now(),
            ..show.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.shows.retain(|s| s.id != id);
        tables.links.retain(|(_, show_id)| *show_id != id);
        Ok(())
    }

    async fn users_of(&self, show_id: Uuid) -> DatabaseResult<Vec<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|u| tables.links.contains(&(u.id, show_id)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        Ok(self.tables.lock().unwrap().users.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let user = User::from_new(new_user);
        self.tables.lock().unwrap().users.push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> DatabaseResult<User> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| DatabaseError::Query(sqlx::Error::RowNotFound))?;
        *stored = User {
            updated_at: Utc::now(),
            ..user.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.users.retain(|u| u.id != id);
        tables.links.retain(|(user_id, _)| *user_id != id);
        Ok(())
    }

    async fn shows_of(&self, user_id: Uuid) -> DatabaseResult<Vec<Show>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .shows
            .iter()
            .filter(|s| tables.links.contains(&(user_id, s.id)))
            .cloned()
            .collect())
    }

    async fn add_show(&self, user_id: Uuid, show_id: Uuid) -> DatabaseResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let user_exists = tables.users.iter().any(|u| u.id == user_id);
        let show_exists = tables.shows.iter().any(|s| s.id == show_id);
        if !user_exists || !show_exists {
            return Err(DatabaseError::Query(sqlx::Error::RowNotFound));
        }
        tables.links.insert((user_id, show_id));
        Ok(())
    }
}

/// Repositories whose every call fails the way a dropped connection would
pub struct FailingStore;

fn unavailable<T>() -> DatabaseResult<T> {
    Err(DatabaseError::Query(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl ShowRepository for FailingStore {
    async fn find_all(&self) -> DatabaseResult<Vec<Show>> {
        unavailable()
    }

    async fn find_by_id(&self, _id: Uuid) -> DatabaseResult<Option<Show>> {
        unavailable()
    }

    async fn find_by_genre(&self, _filter: &GenreFilter) -> DatabaseResult<Vec<Show>> {
        unavailable()
    }

    async fn create(&self, _new_show: &NewShow) -> DatabaseResult<Show> {
        unavailable()
    }

    async fn save(&self, _show: &Show) -> DatabaseResult<Show> {
        unavailable()
    }

    async fn delete(&self, _id: Uuid) -> DatabaseResult<()> {
        unavailable()
    }

    async fn users_of(&self, _show_id: Uuid) -> DatabaseResult<Vec<User>> {
        unavailable()
    }
}

#[async_trait]
impl UserRepository for FailingStore {
    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        unavailable()
    }

    async fn find_by_id(&self, _id: Uuid) -> DatabaseResult<Option<User>> {
        unavailable()
    }

    async fn create(&self, _new_user: &NewUser) -> DatabaseResult<User> {
        unavailable()
    }

    async fn save(&self, _user: &User) -> DatabaseResult<User> {
        unavailable()
    }

    async fn delete(&self, _id: Uuid) -> DatabaseResult<()> {
        unavailable()
    }

    async fn shows_of(&self, _user_id: Uuid) -> DatabaseResult<Vec<Show>> {
        unavailable()
    }

    async fn add_show(&self, _user_id: Uuid, _show_id: Uuid) -> DatabaseResult<()> {
        unavailable()
    }
}

/// Router plus a handle on its backing store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let state = AppState::new(store.clone(), store.clone());
        Self {
            router: create_router(state),
            store,
        }
    }

    pub fn failing() -> Router {
        let store = Arc::new(FailingStore);
        create_router(AppState::new(store.clone(), store))
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router, Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router, Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::DELETE, uri, None).await
    }

    /// Create a show and return its id
    pub async fn create_show(&self, title: &str, genre: &str) -> String {
        let (status, body) = self
            .post("/shows", serde_json::json!({ "title": title, "genre": genre }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Create a user and return its id
    pub async fn create_user(&self, username: &str) -> String {
        let (status, body) = self
            .post(
                "/users",
                serde_json::json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }
}

/// Send one request and decode the JSON response (`Null` for empty bodies)
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Send a raw, possibly malformed, JSON body
pub async fn send_raw(router: &Router, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

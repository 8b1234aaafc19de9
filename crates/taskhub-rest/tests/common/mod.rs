//! Shared fixtures for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use taskhub_config::{SecurityConfig, ServerConfig};
use taskhub_core::{TaskhubError, TaskhubResult, TodoId, User, UserId, UserRole};
use taskhub_rest::{create_router, AppState};
use taskhub_security::{TokenIssuer, TokenProvider};
use taskhub_service::{
    AuthService, CreateTodoRequest, LoginRequest, LoginResponse, RegisterRequest, TodoResponse, TodoService,
    UpdateTodoRequest, UpdateUserRequest, UserResponse, UserService,
};
use tower::ServiceExt;

pub const ADMIN_ID: i64 = 1;
pub const USER_ID: i64 = 2;

pub struct StubAuthService;

#[async_trait]
impl AuthService for StubAuthService {
    async fn login(&self, request: LoginRequest) -> TaskhubResult<LoginResponse> {
        if request.username == "admin" && request.password == "secret" {
            Ok(LoginResponse::bearer("signed-token".to_string(), 86_400))
        } else {
            Err(TaskhubError::InvalidCredentials)
        }
    }

    async fn register(&self, request: RegisterRequest) -> TaskhubResult<UserResponse> {
        Ok(UserResponse {
            id: UserId::new(3),
            username: request.username,
            role: request.role.unwrap_or_default(),
            full_name: request.full_name,
        })
    }
}

pub struct StubUserService;

#[async_trait]
impl UserService for StubUserService {
    async fn find_all(&self) -> TaskhubResult<Vec<UserResponse>> {
        Ok(vec![UserResponse {
            id: UserId::new(ADMIN_ID),
            username: "admin".to_string(),
            role: UserRole::Admin,
            full_name: "Admin".to_string(),
        }])
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> TaskhubResult<UserResponse> {
        if id != UserId::new(ADMIN_ID) {
            return Err(TaskhubError::not_found("User", id));
        }
        Ok(UserResponse {
            id,
            username: "admin".to_string(),
            role: UserRole::Admin,
            full_name: request.full_name,
        })
    }

    async fn delete_user(&self, id: UserId) -> TaskhubResult<()> {
        if id == UserId::new(ADMIN_ID) {
            Ok(())
        } else {
            Err(TaskhubError::not_found("User", id))
        }
    }
}

/// Records the owner of the last created todo.
#[derive(Default)]
pub struct StubTodoService {
    pub last_owner: Mutex<Option<UserId>>,
}

fn todo(id: i64, owner: UserId, title: String) -> TodoResponse {
    TodoResponse {
        id: TodoId::new(id),
        title,
        content: String::new(),
        due_date: None,
        completed: false,
        user_id: owner,
    }
}

#[async_trait]
impl TodoService for StubTodoService {
    async fn find_all(&self) -> TaskhubResult<Vec<TodoResponse>> {
        Ok(vec![todo(1, UserId::new(USER_ID), "Water plants".to_string())])
    }

    async fn create_todo(&self, owner: UserId, request: CreateTodoRequest) -> TaskhubResult<TodoResponse> {
        *self.last_owner.lock().unwrap() = Some(owner);
        Ok(todo(10, owner, request.title))
    }

    async fn update_todo(&self, id: TodoId, request: UpdateTodoRequest) -> TaskhubResult<TodoResponse> {
        if id != TodoId::new(1) {
            return Err(TaskhubError::not_found("Todo", id));
        }
        let mut updated = todo(1, UserId::new(USER_ID), "Water plants".to_string());
        updated.completed = request.completed;
        Ok(updated)
    }

    async fn delete_todo(&self, id: TodoId) -> TaskhubResult<()> {
        if id == TodoId::new(1) {
            Ok(())
        } else {
            Err(TaskhubError::not_found("Todo", id))
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub tokens: Arc<TokenProvider>,
    pub todos: Arc<StubTodoService>,
}

impl TestApp {
    pub fn new() -> Self {
        let tokens = Arc::new(TokenProvider::new(Arc::new(SecurityConfig {
            jwt_secret: "router-test-secret".to_string(),
            ..Default::default()
        })));
        let todos = Arc::new(StubTodoService::default());

        let state = AppState::new(
            Arc::new(StubAuthService),
            Arc::new(StubUserService),
            todos.clone(),
            tokens.clone(),
        );
        let router = create_router(state, &ServerConfig::default());

        Self { router, tokens, todos }
    }

    pub fn token_for(&self, id: i64, role: UserRole) -> String {
        let user = User {
            id: UserId::new(id),
            username: format!("user-{}", id),
            password_hash: String::new(),
            role,
            full_name: String::new(),
        };
        let claims = self.tokens.access_claims(&user);
        self.tokens.generate_access_token(&claims).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token_for(ADMIN_ID, UserRole::Admin)
    }

    pub fn user_token(&self) -> String {
        self.token_for(USER_ID, UserRole::User)
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<&str>) -> (u16, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        read(response).await
    }
}

async fn read(response: Response<Body>) -> (u16, Value) {
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

//! Shared fixtures for HTTP handler tests: an in-memory repository set,
//! a cookie-session test app, and helpers for acquiring signed-in
//! session cookies.

use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{test as actix_test, web, App};
use async_trait::async_trait;

use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, ClientPersistenceError, ClientRepository,
    PostPersistenceError, PostRepository,
};
use crate::domain::{
    Account, Client, ClientDraft, NewAccount, Post, PostCriterion, PostDraft,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, clients, posts};
use crate::outbound::auth::PasswordAccountService;

/// Cookie-backed session middleware with a throwaway key, matching the
/// production configuration apart from `cookie_secure`.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build()
}

/// In-memory client store driven by the domain matching rules.
#[derive(Default)]
pub struct MemoryClients {
    rows: Mutex<Vec<Client>>,
    next_id: AtomicI64,
}

#[async_trait]
impl ClientRepository for MemoryClients {
    async fn list(&self) -> Result<Vec<Client>, ClientPersistenceError> {
        Ok(self.rows.lock().expect("lock").clone())
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Client>, ClientPersistenceError> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .filter(|client| client.matches(keyword))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, ClientPersistenceError> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .find(|client| client.id == id)
            .cloned())
    }

    async fn save(&self, draft: ClientDraft) -> Result<Client, ClientPersistenceError> {
        let mut rows = self.rows.lock().expect("lock");
        let id = draft
            .id
            .unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let client = Client {
            id,
            full_name: draft.full_name,
            visit_date: draft.visit_date,
            service: draft.service,
            master_name: draft.master_name,
        };
        match rows.iter_mut().find(|row| row.id == id) {
            Some(row) => *row = client.clone(),
            None => rows.push(client.clone()),
        }
        Ok(client)
    }

    async fn delete(&self, id: i64) -> Result<(), ClientPersistenceError> {
        self.rows.lock().expect("lock").retain(|row| row.id != id);
        Ok(())
    }
}

/// In-memory post store driven by the domain matching rules.
#[derive(Default)]
pub struct MemoryPosts {
    rows: Mutex<Vec<Post>>,
    next_id: AtomicI64,
}

#[async_trait]
impl PostRepository for MemoryPosts {
    async fn list(&self) -> Result<Vec<Post>, PostPersistenceError> {
        Ok(self.rows.lock().expect("lock").clone())
    }

    async fn search_by(
        &self,
        criterion: PostCriterion,
        keyword: &str,
    ) -> Result<Vec<Post>, PostPersistenceError> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .filter(|post| post.matches(criterion, keyword))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, PostPersistenceError> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .find(|post| post.id == id)
            .cloned())
    }

    async fn save(&self, draft: PostDraft) -> Result<Post, PostPersistenceError> {
        let mut rows = self.rows.lock().expect("lock");
        let id = draft
            .id
            .unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let post = Post {
            id,
            post_name: draft.post_name,
            publish_date: draft.publish_date,
            text: draft.text,
            client_name: draft.client_name,
            vk_link: draft.vk_link,
            link: draft.link,
        };
        match rows.iter_mut().find(|row| row.id == id) {
            Some(row) => *row = post.clone(),
            None => rows.push(post.clone()),
        }
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), PostPersistenceError> {
        self.rows.lock().expect("lock").retain(|row| row.id != id);
        Ok(())
    }
}

/// In-memory account store enforcing unique names.
#[derive(Default)]
pub struct MemoryAccounts {
    rows: Mutex<Vec<Account>>,
    next_id: AtomicI32,
}

#[async_trait]
impl AccountRepository for MemoryAccounts {
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountPersistenceError> {
        let mut rows = self.rows.lock().expect("lock");
        if rows.iter().any(|row| row.name == account.name) {
            return Err(AccountPersistenceError::duplicate_name(account.name));
        }
        let stored = Account {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: account.name,
            password_hash: account.password_hash,
            roles: account.roles,
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, AccountPersistenceError> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .find(|row| row.name == name)
            .cloned())
    }
}

/// Handler state wired to fresh in-memory stores and the real
/// password-hashing auth service.
pub fn test_state() -> HttpState {
    let accounts: Arc<dyn AccountRepository> = Arc::new(MemoryAccounts::default());
    let auth_service = Arc::new(PasswordAccountService::new(accounts));
    HttpState {
        clients: Arc::new(MemoryClients::default()),
        posts: Arc::new(MemoryPosts::default()),
        login: auth_service.clone(),
        registration: auth_service,
    }
}

/// Full application under test: every page handler behind the session
/// middleware.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(clients::list_clients)
        .service(clients::new_client_form)
        .service(clients::save_client)
        .service(clients::edit_client_form)
        .service(clients::delete_client)
        .service(posts::search_posts)
        .service(posts::new_post_form)
        .service(posts::save_post)
        .service(posts::edit_post_form)
        .service(posts::delete_post)
        .service(auth::register_form)
        .service(auth::register)
        .service(auth::login_form)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::access_denied)
        .service(auth::about_us)
}

/// The session cookie set by a response, if any.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse_encoded(value.to_owned()).ok())
        .find(|cookie| cookie.name() == "session")
}

/// Register an account through the HTTP surface and return the response.
pub async fn register_account<S>(
    app: &S,
    name: &str,
    password: &str,
    roles: &str,
) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/auth/register")
            .set_form(auth::RegistrationForm {
                name: name.into(),
                password: password.into(),
                roles: roles.into(),
            })
            .to_request(),
    )
    .await
}

/// Session cookie for a freshly registered non-admin account.
pub async fn login_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = register_account(app, "pat", "correct-horse", "ROLE_USER").await;
    session_cookie(&res).expect("registration establishes a session")
}

/// Session cookie for a freshly registered admin account.
pub async fn admin_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = register_account(app, "boss", "correct-horse", "ROLE_USER,ROLE_ADMIN").await;
    session_cookie(&res).expect("registration establishes a session")
}

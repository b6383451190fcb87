//! 服务层测试共用的上下文
use actix_web::{HttpMessage, HttpRequest, HttpResponse, test::TestRequest};
use std::sync::Arc;

use crate::models::students::{
    entities::{Gender, Student},
    requests::CreateStudentRequest,
};
use crate::models::users::entities::{Role, RoleFlags, RoleSet, User};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use crate::utils::password::hash_password;

pub(crate) struct TestContext {
    pub storage: Arc<dyn Storage>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self {
            storage: Arc::new(SeaOrmStorage::in_memory().await),
        }
    }

    pub async fn user_with_password(&self, username: &str, password: &str, role: Role) -> User {
        self.storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                password_hash: hash_password(password).unwrap(),
                roles: RoleSet::single(role),
                is_superuser: false,
            })
            .await
            .unwrap()
    }

    /// 不需要真实密码的账号
    pub async fn user(&self, username: &str, roles: RoleSet, is_superuser: bool) -> User {
        self.storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                password_hash: "not-a-hash".to_string(),
                roles,
                is_superuser,
            })
            .await
            .unwrap()
    }

    pub async fn admin(&self) -> User {
        self.user("principal", RoleSet::single(Role::Admin), false).await
    }

    pub async fn teacher(&self, username: &str) -> User {
        self.user(username, RoleSet::single(Role::Teacher), false).await
    }

    /// 直接写库的学生档案，密码不可用
    pub async fn student(&self, username: &str, roll_number: i64) -> Student {
        self.storage
            .create_student(CreateStudentRequest {
                username: username.to_string(),
                password: "not-a-hash".to_string(),
                roll_number,
                classroom_id: None,
                gender: Gender::Male,
                date_of_birth: chrono::NaiveDate::from_ymd_opt(2011, 8, 23).unwrap(),
                address: String::new(),
                profile_image: None,
            })
            .await
            .unwrap()
    }

    /// 模拟已通过 RequireJWT 的请求
    pub fn request_as(&self, user: &User) -> HttpRequest {
        let req = TestRequest::default().to_http_request();
        let flags = RoleFlags::resolve(Some(user));
        req.extensions_mut().insert(user.clone());
        req.extensions_mut().insert(flags);
        req
    }

    pub async fn notifications_of(&self, user_id: i64) -> Vec<crate::models::notifications::entities::Notification> {
        self.storage
            .list_notifications_with_pagination(user_id, Default::default())
            .await
            .unwrap()
            .items
    }
}

pub(crate) async fn response_json(resp: HttpResponse) -> serde_json::Value {
    let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub(crate) async fn response_code(resp: HttpResponse) -> i32 {
    response_json(resp).await["code"].as_i64().unwrap() as i32
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// 角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub const ADMIN: &'static str = "admin";
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => Self::ADMIN,
            Role::Teacher => Self::TEACHER,
            Role::Student => Self::STUDENT,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ADMIN => Ok(Role::Admin),
            Self::TEACHER => Ok(Role::Teacher),
            Self::STUDENT => Ok(Role::Student),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

/// 账号持有的角色集合，数据库中以逗号分隔存储
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn single(role: Role) -> Self {
        Self(BTreeSet::from([role]))
    }

    /// 解析数据库列，忽略无法识别的片段
    pub fn from_column(raw: &str) -> Self {
        Self(
            raw.split(',')
                .filter_map(|part| part.trim().parse().ok())
                .collect(),
        )
    }

    pub fn to_column(&self) -> String {
        self.0
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn insert(&mut self, role: Role) {
        self.0.insert(role);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// 账号
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)] // 不序列化到 JSON 响应中
    pub password_hash: String,
    pub roles: RoleSet,
    pub is_superuser: bool,
    pub dark_mode: bool,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 每个请求解析一次的角色标志，三者互不排斥
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleFlags {
    pub is_admin: bool,
    pub is_teacher: bool,
    pub is_student: bool,
}

impl RoleFlags {
    /// 未登录时全部为 false
    pub fn resolve(user: Option<&User>) -> Self {
        match user {
            None => Self::default(),
            Some(user) => Self {
                is_admin: user.is_superuser || user.roles.contains(Role::Admin),
                is_teacher: user.roles.contains(Role::Teacher),
                is_student: user.roles.contains(Role::Student),
            },
        }
    }
}

/// 访问控制门
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    AdminOnly,
    TeacherOnly,
    StudentOnly,
    AdminOrTeacher,
}

impl Gate {
    pub fn allows(&self, flags: &RoleFlags) -> bool {
        match self {
            Gate::AdminOnly => flags.is_admin,
            Gate::TeacherOnly => flags.is_teacher,
            Gate::StudentOnly => flags.is_student,
            Gate::AdminOrTeacher => flags.is_admin || flags.is_teacher,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn user_with(roles: &[Role], is_superuser: bool) -> User {
        let now = chrono::Utc::now();
        User {
            id: 1,
            username: "tester".to_string(),
            password_hash: String::new(),
            roles: roles.iter().copied().collect(),
            is_superuser,
            dark_mode: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_unauthenticated_has_no_flags() {
        assert_eq!(RoleFlags::resolve(None), RoleFlags::default());
    }

    #[test]
    fn test_superuser_without_roles_is_only_admin() {
        let flags = RoleFlags::resolve(Some(&user_with(&[], true)));
        assert!(flags.is_admin);
        assert!(!flags.is_teacher);
        assert!(!flags.is_student);
    }

    #[test]
    fn test_admin_role_without_superuser_is_admin() {
        let flags = RoleFlags::resolve(Some(&user_with(&[Role::Admin], false)));
        assert!(flags.is_admin);
    }

    #[test]
    fn test_flags_are_not_exclusive() {
        let flags = RoleFlags::resolve(Some(&user_with(&[Role::Teacher, Role::Student], false)));
        assert!(!flags.is_admin);
        assert!(flags.is_teacher);
        assert!(flags.is_student);
    }

    #[test]
    fn test_gates() {
        let teacher = RoleFlags {
            is_teacher: true,
            ..Default::default()
        };
        let admin = RoleFlags {
            is_admin: true,
            ..Default::default()
        };
        let student = RoleFlags {
            is_student: true,
            ..Default::default()
        };

        assert!(Gate::AdminOrTeacher.allows(&teacher));
        assert!(Gate::AdminOrTeacher.allows(&admin));
        assert!(!Gate::AdminOrTeacher.allows(&student));
        assert!(!Gate::AdminOnly.allows(&teacher));
        assert!(Gate::TeacherOnly.allows(&teacher));
        assert!(!Gate::TeacherOnly.allows(&admin));
        assert!(Gate::StudentOnly.allows(&student));

        let nobody = RoleFlags::default();
        for gate in [
            Gate::AdminOnly,
            Gate::TeacherOnly,
            Gate::StudentOnly,
            Gate::AdminOrTeacher,
        ] {
            assert!(!gate.allows(&nobody));
        }
    }

    #[test]
    fn test_role_set_column_roundtrip() {
        let set = RoleSet::from_column("teacher, admin,bogus");
        assert!(set.contains(Role::Admin));
        assert!(set.contains(Role::Teacher));
        assert_eq!(set.to_column(), "admin,teacher");
        assert!(RoleSet::from_column("").is_empty());
    }
}

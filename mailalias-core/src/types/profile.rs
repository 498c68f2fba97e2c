//! 账户资料类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 账户角色
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// 未知值按普通用户处理
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/// 账户资料，每个账户一条
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// 账户 ID
    pub id: String,
    /// 别名（邮箱 local-part），分配后不再变化
    pub alias: String,
    /// `alias@apex_domain`
    pub email: String,
    /// 转发目标，`None` 表示未开启转发
    pub forward_to: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// 新建资料，时间戳取当前时间
    pub fn new(id: impl Into<String>, alias: impl Into<String>, apex_domain: &str) -> Self {
        let alias = alias.into();
        let now = Utc::now();
        Self {
            id: id.into(),
            email: format!("{alias}@{apex_domain}"),
            alias,
            forward_to: None,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// 该账户的转发意图
    pub fn forwarding_intent(&self) -> ForwardingIntent {
        ForwardingIntent {
            alias: self.alias.clone(),
            forward_to: self.forward_to.clone(),
        }
    }
}

/// 别名的期望转发状态
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForwardingIntent {
    pub alias: String,
    pub forward_to: Option<String>,
}

impl ForwardingIntent {
    pub fn is_enabled(&self) -> bool {
        self.forward_to.is_some()
    }
}

//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and the
//! admin REST API. Services are generic over repository traits; AppState pins
//! them to the SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use folksonomy_core::admin::AdminSite;
use folksonomy_core::service::skill::SkillService;
use folksonomy_core::service::tag::TagService;
use folksonomy_core::service::user::UserService;
use folksonomy_infra::config::load_global_config;
use folksonomy_infra::filesystem::{ensure_data_dir, resolve_data_dir};
use folksonomy_infra::sqlite::category::SqliteCategoryRepository;
use folksonomy_infra::sqlite::pool::{database_url, DatabasePool};
use folksonomy_infra::sqlite::skill::SqliteSkillRepository;
use folksonomy_infra::sqlite::tag::SqliteTagRepository;
use folksonomy_infra::sqlite::user::SqliteUserRepository;
use folksonomy_infra::sqlite::user_skill::SqliteUserSkillRepository;
use folksonomy_types::config::GlobalConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteTagService = TagService<SqliteTagRepository>;

pub type ConcreteSkillService = SkillService<SqliteSkillRepository, SqliteCategoryRepository>;

pub type ConcreteUserService =
    UserService<SqliteUserRepository, SqliteUserSkillRepository, SqliteSkillRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub tag_service: Arc<ConcreteTagService>,
    pub skill_service: Arc<ConcreteSkillService>,
    pub user_service: Arc<ConcreteUserService>,
    pub admin: Arc<AdminSite>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir(data_dir);
        ensure_data_dir(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        let db_url = database_url(&data_dir, &config.database_file);
        let db_pool = DatabasePool::new(&db_url).await?;

        let tag_service = TagService::new(SqliteTagRepository::new(db_pool.clone()));
        let skill_service = SkillService::new(
            SqliteSkillRepository::new(db_pool.clone()),
            SqliteCategoryRepository::new(db_pool.clone()),
        );
        let user_service = UserService::new(
            SqliteUserRepository::new(db_pool.clone()),
            SqliteUserSkillRepository::new(db_pool.clone()),
            SqliteSkillRepository::new(db_pool.clone()),
        );

        tracing::debug!(data_dir = %data_dir.display(), "application state ready");

        Ok(Self {
            tag_service: Arc::new(tag_service),
            skill_service: Arc::new(skill_service),
            user_service: Arc::new(user_service),
            admin: Arc::new(AdminSite::standard()),
            config: Arc::new(config),
            data_dir,
            db_pool,
        })
    }
}

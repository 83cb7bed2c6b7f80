use std::path::{Path, PathBuf};
use clap::Args;
use log::{info, LevelFilter};

pub const DB_FILE_NAME: &str = "wanderlust.db.json";
const DEFAULT_WORKDIR_NAME: &str = ".wanderlust";

#[derive(Args, Debug, Clone)]
pub struct FlatConfig {
    #[arg(long, global = true, env = "WANDERLUST_WORKDIR", help = "Directory holding the journal data [default: ~/.wanderlust]")]
    pub workdir: Option<PathBuf>,

    #[arg(long, global = true, env = "WANDERLUST_HOST", default_value = "127.0.0.1", help = "Address the web UI binds to")]
    pub host: String,

    #[arg(long, global = true, env = "WANDERLUST_PORT", default_value_t = 1698, help = "Port the web UI listens on")]
    pub port: u16,

    #[arg(long, global = true, env = "WANDERLUST_LOG", default_value = "info", help = "Log level: off, error, warn, info, debug, trace")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub workdir: PathBuf,
    pub db_path: PathBuf,
    pub http: HttpConfig,
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl HttpConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    pub fn new(flat: FlatConfig) -> anyhow::Result<Self> {
        let workdir = match flat.workdir {
            Some(x) => x,
            None => default_workdir()?,
        };
        let workdir = get_or_create_workdir(&workdir)?;
        let db_path = workdir.join(DB_FILE_NAME);
        if db_path.exists() && !db_path.is_file() {
            anyhow::bail!("db_path is not a file: {}", db_path.display());
        }
        info!("db_path: {}", db_path.display());
        Ok(Self {
            workdir,
            db_path,
            http: HttpConfig { host: flat.host, port: flat.port },
            log_level: flat.log_level,
        })
    }
}

fn default_workdir() -> anyhow::Result<PathBuf> {
    let home_dir = home::home_dir().ok_or(anyhow::anyhow!("failed to find home directory"))?;
    Ok(home_dir.join(DEFAULT_WORKDIR_NAME))
}

fn get_or_create_workdir(workdir: &Path) -> anyhow::Result<PathBuf> {
    if !workdir.exists() {
        std::fs::create_dir_all(workdir)?;
    }
    if !workdir.is_dir() {
        anyhow::bail!("workdir is not a directory: {}", workdir.display());
    }
    let workdir = workdir.canonicalize()?;
    info!("workdir: {}", workdir.display());
    Ok(workdir)
}

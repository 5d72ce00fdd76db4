use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_port: u16,
    pub frontend_url: Option<String>,
    pub data_dir: PathBuf,
    pub admin_wizard: String,
    pub seed_default_wizards: bool,
    pub encryption_secret: Option<String>,
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);
        let frontend_url = env::var("FRONTEND_URL").ok();
        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()));
        let admin_wizard = env::var("ADMIN_WIZARD").unwrap_or_else(|_| "Dumbledore".into());
        let seed_default_wizards = env::var("SEED_DEFAULT_WIZARDS")
            .ok()
            .map(|v| !matches!(v.trim(), "false" | "0" | "no"))
            .unwrap_or(true);
        let encryption_secret = env::var("ENCRYPTION_KEY").ok().filter(|s| !s.trim().is_empty());
        let is_production = matches!(
            env::var("RUST_ENV").ok().as_deref(),
            Some("production") | Some("prod")
        );

        // Production hardening: no dev seed keys, proper CORS origin, strong secret
        if is_production {
            if seed_default_wizards {
                anyhow::bail!(
                    "SEED_DEFAULT_WIZARDS must be disabled in production; provision wizards via the admin API"
                );
            }
            if !frontend_url
                .as_deref()
                .map(|u| u.starts_with("http"))
                .unwrap_or(false)
            {
                anyhow::bail!(
                    "FRONTEND_URL must be set to a full origin in production (e.g., https://app.example.com)"
                );
            }
            if let Some(secret) = &encryption_secret {
                if secret.len() < 16 {
                    anyhow::bail!("ENCRYPTION_KEY must be a strong secret in production");
                }
            }
        }

        Ok(Self {
            api_port,
            frontend_url,
            data_dir,
            admin_wizard,
            seed_default_wizards,
            encryption_secret,
            is_production,
        })
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.data_dir.join("notes")
    }

    pub fn wizards_file(&self) -> PathBuf {
        self.data_dir.join("wizards_info.json")
    }

    pub fn notes_meta_file(&self) -> PathBuf {
        self.data_dir.join("notes_meta.json")
    }

    pub fn share_data_file(&self) -> PathBuf {
        self.data_dir.join("share_data.json")
    }

    pub fn key_file(&self) -> PathBuf {
        self.data_dir.join(".note_key")
    }

    /// Development accounts written on first run when seeding is enabled.
    pub fn default_wizards(&self) -> Vec<(String, String)> {
        if !self.seed_default_wizards {
            return Vec::new();
        }
        [
            ("Harry", "harry_secret_key_123"),
            ("Hermione", "hermione_secret_key_456"),
            ("Ron", "ron_secret_key_789"),
            ("Hagrid", "hagrid_secret_key_012"),
            ("Dumbledore", "dumbledore_admin_key_999"),
        ]
        .into_iter()
        .map(|(n, k)| (n.to_string(), k.to_string()))
        .collect()
    }
}

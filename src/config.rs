use chrono::Offset;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOption {
    pub id: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Http,
    Demo,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint_url: String,
    pub backend: Backend,
    pub request_timeout: Option<Duration>,
    pub result_display_delay: Duration,
    pub notice_duration: Duration,
    pub notice_fade: Duration,
    pub models: Vec<ModelOption>,
    pub preview_max_side: u32,
    pub ambient_particle_count: usize,
    pub burst_particle_count: usize,
    pub burst_stagger: Duration,
    pub burst_particle_lifetime: Duration,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: "http://127.0.0.1:5000/predict".to_string(),
            backend: Backend::Http,
            request_timeout: None,
            result_display_delay: Duration::from_millis(1500),
            notice_duration: Duration::from_millis(2200),
            notice_fade: Duration::from_millis(400),
            models: vec![
                ModelOption {
                    id: "model1".to_string(),
                    label: "Model 1".to_string(),
                    description: "Baseline CNN".to_string(),
                },
                ModelOption {
                    id: "model2".to_string(),
                    label: "Model 2".to_string(),
                    description: "Transfer learning".to_string(),
                },
                ModelOption {
                    id: "model3".to_string(),
                    label: "Model 3".to_string(),
                    description: "Ensemble".to_string(),
                },
            ],
            preview_max_side: 1024,
            ambient_particle_count: 30,
            burst_particle_count: 20,
            burst_stagger: Duration::from_millis(100),
            burst_particle_lifetime: Duration::from_secs(3),
            logger_timezone: utc(),
        }
    }
}

impl Config {
    pub fn default_model_id(&self) -> String {
        self.models
            .first()
            .map(|model| model.id.clone())
            .unwrap_or_else(|| "model1".to_string())
    }

    pub fn has_model(&self, id: &str) -> bool {
        self.models.iter().any(|model| model.id == id)
    }

    pub fn with_args(mut self, args: Args) -> Self {
        if let Some(endpoint) = args.endpoint {
            self.endpoint_url = endpoint;
        }
        if args.demo {
            self.backend = Backend::Demo;
        }
        if let Some(secs) = args.timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        self
    }
}

/// Desktop client for a remote fire detection model.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// URL of the prediction endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Fabricate random results instead of calling the endpoint
    #[arg(long)]
    pub demo: bool,

    /// Give up on a prediction request after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}

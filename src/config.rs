use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct SamplingConfig {
    pub style_image_size: u32,
    pub content_image_size: u32,
    pub blend_sampling_steps: u32,
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub style_base_dir: PathBuf,
    pub ttf_path: Option<PathBuf>,
    pub inference: Option<InferenceConfig>,
    pub sampling: SamplingConfig,
    pub cache_capacity: Option<usize>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            base_url: None,
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl InferenceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("INFERENCE_URL").ok();
        let api_key = env::var("INFERENCE_API_KEY").ok();
        let timeout_secs = env::var("INFERENCE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        InferenceConfig {
            base_url,
            api_key,
            timeout_secs,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            style_image_size: 128,
            content_image_size: 128,
            blend_sampling_steps: 20,
            seed: 42,
        }
    }
}

impl SamplingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        SamplingConfig {
            style_image_size: parse_env("STYLE_IMAGE_SIZE").unwrap_or(defaults.style_image_size),
            content_image_size: parse_env("CONTENT_IMAGE_SIZE")
                .unwrap_or(defaults.content_image_size),
            blend_sampling_steps: parse_env("BLEND_SAMPLING_STEPS")
                .unwrap_or(defaults.blend_sampling_steps),
            seed: parse_env("SAMPLING_SEED").unwrap_or(defaults.seed),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: None,
            port: None,
            style_base_dir: PathBuf::from("."),
            ttf_path: None,
            inference: None,
            sampling: SamplingConfig::default(),
            cache_capacity: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let host = env::var("HOST").ok();
        let port = parse_env("PORT");
        let style_base_dir = env::var("STYLE_BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let ttf_path = env::var("TTF_PATH").ok().map(PathBuf::from);
        let inference = InferenceConfig::from_env();
        let inference = inference.base_url.is_some().then_some(inference);
        let cache_capacity = parse_env("CACHE_CAPACITY").filter(|&n: &usize| n > 0);

        Config {
            host,
            port,
            style_base_dir,
            ttf_path,
            inference,
            sampling: SamplingConfig::from_env(),
            cache_capacity,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_style_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.style_base_dir = dir.into();
        self
    }

    pub fn with_ttf_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ttf_path = Some(path.into());
        self
    }

    pub fn with_inference(mut self, config: InferenceConfig) -> Self {
        self.inference = Some(config);
        self
    }

    pub fn with_sampling(mut self, config: SamplingConfig) -> Self {
        self.sampling = config;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    pub fn bind_address(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| "0.0.0.0".to_string()),
            self.port.unwrap_or(8000),
        )
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = Config::new()
            .with_port(9000)
            .with_style_base_dir("/srv/styles")
            .with_ttf_path("/srv/ttf/KaiXinSongA.ttf")
            .with_cache_capacity(64)
            .with_inference(InferenceConfig::new().with_base_url("http://gpu:7000"));

        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 9000));
        assert_eq!(config.style_base_dir, PathBuf::from("/srv/styles"));
        assert_eq!(config.cache_capacity, Some(64));
        assert_eq!(
            config.inference.and_then(|i| i.base_url).as_deref(),
            Some("http://gpu:7000")
        );
    }

    #[test]
    fn test_sampling_defaults() {
        let sampling = SamplingConfig::default();
        assert_eq!(sampling.style_image_size, 128);
        assert_eq!(sampling.content_image_size, 128);
        assert_eq!(sampling.blend_sampling_steps, 20);
        assert_eq!(sampling.seed, 42);
    }

    #[test]
    fn test_from_env_reads_variables() {
        env::set_var("GLYPHGEN_TEST_PORT", "8123");
        assert_eq!(parse_env::<u16>("GLYPHGEN_TEST_PORT"), Some(8123));
        env::set_var("GLYPHGEN_TEST_PORT", "not-a-port");
        assert_eq!(parse_env::<u16>("GLYPHGEN_TEST_PORT"), None);
        env::remove_var("GLYPHGEN_TEST_PORT");
    }
}

// Scan thresholds
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576; // 1 MiB
pub const DEFAULT_CHUNK_SIZE: usize = 51_200; // 50 KiB
pub const DEFAULT_BATCH_SIZE: u64 = 102_400; // 100 KiB
pub const DEFAULT_MAX_WORKERS: usize = 10;
pub const MAX_WORKERS_LIMIT: usize = 20;

// Provider request defaults
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RATE_LIMIT_DELAY_SECS: f64 = 0.5;
pub const ANALYSIS_TEMPERATURE: f32 = 0.3;
pub const ANALYSIS_MAX_TOKENS: u32 = 16_000;
// Lower temperature for more consistent validation verdicts
pub const VALIDATION_TEMPERATURE: f32 = 0.2;
pub const VALIDATION_MAX_TOKENS: u32 = 4_000;

// Retry policy defaults
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY_SECS: u64 = 2;
pub const DEFAULT_RETRY_MAX_DELAY_SECS: u64 = 10;

// Provider endpoints
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

// Environment variable names
pub const LLM_PROVIDER_ENV: &str = "LLM_PROVIDER";
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const OPENROUTER_MODEL_ENV: &str = "OPENROUTER_MODEL";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL_ENV: &str = "OPENAI_MODEL";
pub const CUSTOM_API_KEY_ENV: &str = "CUSTOM_API_KEY";
pub const CUSTOM_MODEL_ENV: &str = "CUSTOM_MODEL";
pub const CUSTOM_PROVIDER_URL_ENV: &str = "CUSTOM_PROVIDER_URL";
pub const RATE_LIMIT_DELAY_ENV: &str = "RATE_LIMIT_DELAY";
pub const REQUEST_TIMEOUT_ENV: &str = "REQUEST_TIMEOUT";
pub const ENABLE_CHECKER_ENV: &str = "ENABLE_CHECKER";
pub const CHECKER_PROVIDER_ENV: &str = "CHECKER_PROVIDER";
pub const CHECKER_API_KEY_ENV: &str = "CHECKER_API_KEY";
pub const CHECKER_MODEL_ENV: &str = "CHECKER_MODEL";
pub const CHECKER_PROVIDER_URL_ENV: &str = "CHECKER_PROVIDER_URL";

pub const DEFAULT_OPENROUTER_MODEL: &str = "anthropic/claude-3-haiku";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".jsx", ".ts", ".tsx", ".java", ".go",
    ".rb", ".php", ".cs", ".cpp", ".c", ".h", ".hpp",
];

pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    ".git", "__pycache__", "node_modules", ".venv",
    "venv", "*.min.js", "*.min.css", ".pyc",
];

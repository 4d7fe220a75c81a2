pub mod compile_time {
    pub mod params {
        /// Maximum parameter line length in bytes
        /// SECURITY: Prevents DoS via pathological single-line inputs
        pub const MAX_LINE_LENGTH: usize = 16384;

        /// Maximum components allowed on a single parameter line
        /// SECURITY: Bounds the per-line component vector
        pub const MAX_COMPONENTS_PER_LINE: usize = 1024;

        /// Maximum parameter lines per purpose block
        /// RESOURCE: Bounds recursion depth during expansion
        pub const MAX_PURPOSE_LINES: usize = 512;

        /// Maximum accumulated token length in bytes
        /// SECURITY: Prevents memory attacks via huge tokens
        pub const MAX_TOKEN_LENGTH: usize = 8192;
    }

    pub mod generation {
        /// Maximum purposes generated from one block
        /// SECURITY: Prevents combinatorial explosion attacks
        pub const MAX_PURPOSES_PER_BLOCK: u64 = 1_000_000;

        /// Maximum total generated output size in bytes (1GB)
        /// RESOURCE: Prevents unbounded output accumulation
        pub const MAX_OUTPUT_SIZE: u64 = 1_000_000_000;

        /// Maximum purpose template size in bytes (1MB)
        /// SECURITY: Prevents memory attacks via huge templates
        pub const MAX_TEMPLATE_SIZE: usize = 1_048_576;
    }

    pub mod document {
        /// Maximum source document size in bytes (100MB)
        /// SECURITY: Prevents DoS via large document uploads
        pub const MAX_SOURCE_SIZE: u64 = 100_000_000;

        /// Maximum blocks per source document
        /// RESOURCE: Bounds block vector growth
        pub const MAX_BLOCKS_PER_SOURCE: usize = 4096;

        /// Maximum PURPOSE sections per block
        /// RESOURCE: Bounds per-block section accumulation
        pub const MAX_PURPOSES_PER_BLOCK_SECTION: usize = 1024;

        /// Maximum attributes per tag
        /// SECURITY: Prevents attribute explosion attacks
        pub const MAX_ATTRIBUTES_PER_TAG: usize = 16;

        /// Maximum tag name length
        /// SECURITY: Prevents memory attacks via huge tag names
        pub const MAX_TAG_NAME_LENGTH: usize = 64;
    }

    pub mod security {
        /// Maximum memory usage before triggering alerts (1GB)
        /// SECURITY: Resource monitoring threshold
        pub const MEMORY_ALERT_THRESHOLD: u64 = 1_000_000_000;

        /// Maximum processing time per source (seconds)
        /// SECURITY: Prevents DoS via processing time attacks
        pub const MAX_PROCESSING_TIME_SECONDS: u64 = 1800;
    }

    pub mod logging {
        /// Maximum errors to collect before stopping
        /// RESOURCE: Prevents unbounded error accumulation
        pub const MAX_ERROR_COLLECTION: usize = 10_000;

        /// Log buffer size for batch operations
        /// RESOURCE: Controls memory usage for logging
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 4096;

        /// Maximum log events per source before truncation
        /// SECURITY: Prevents DoS via log event explosion
        pub const MAX_LOG_EVENTS_PER_FILE: usize = 1_000;

        /// Minimum log level for degradation warnings (cannot be changed at runtime)
        /// SECURITY: Ensures degraded lines are always reported
        pub const SECURITY_MIN_LOG_LEVEL: u8 = 1; // Warning level minimum

        /// Maximum audit log retention buffer size
        /// SECURITY: Ensures audit trail completeness
        pub const AUDIT_LOG_RETENTION_BUFFER: usize = 2_000;
    }
}

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 订单输入 CSV 路径
    pub input_csv: String,
    /// 结果输出 CSV 路径
    pub output_csv: String,
    /// 订单查询页 URL
    pub target_url: String,
    /// 浏览器可执行文件路径（不设置则用系统默认 Chromium）
    pub chrome_executable: Option<String>,
    /// 提交后等待结果页的超时秒数
    pub result_wait_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_csv: "orders.csv".to_string(),
            output_csv: "orderstatus.csv".to_string(),
            target_url: "https://www.adidas.com/us/order-tracker".to_string(),
            chrome_executable: None,
            result_wait_secs: 30,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input_csv: std::env::var("INPUT_CSV").unwrap_or(default.input_csv),
            output_csv: std::env::var("OUTPUT_CSV").unwrap_or(default.output_csv),
            target_url: std::env::var("TARGET_URL").unwrap_or(default.target_url),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok(),
            result_wait_secs: std::env::var("RESULT_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.result_wait_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}

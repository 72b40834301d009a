use std::time::Duration;

/// How long a cached percent-change figure stays fresh.
pub const CHANGE_TTL: Duration = Duration::from_secs(60);

/// K-line type requested for the percent-change lookup (daily bars).
pub const CHANGE_KLINE_TYPE: u32 = 6;

/// Number of bars requested for the percent-change lookup.
pub const CHANGE_KLINE_NUM: u32 = 1;

/// Defaults for `/stocks/kline` when the caller omits them.
pub const DEFAULT_KLINE_TYPE: u32 = 1;
pub const DEFAULT_KLINE_NUM: u32 = 20;

/// Maximum number of symbols returned by a search.
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Percent change reported when no figure is known for a symbol.
pub const UNKNOWN_PERCENT_CHANGE: &str = "0";

/// Symbols offered on the "popular" shelf, as (symbol, name).
pub const POPULAR_STOCKS: [(&str, &str); 10] = [
    ("600519.SH", "贵州茅台"),
    ("300750.SZ", "宁德时代"),
    ("601318.SH", "中国平安"),
    ("002594.SZ", "比亚迪"),
    ("600036.SH", "招商银行"),
    ("300059.SZ", "东方财富"),
    ("000858.SZ", "五粮液"),
    ("601138.SH", "工业富联"),
    ("002230.SZ", "科大讯飞"),
    ("603259.SH", "药明康德"),
];

/// Avatar background colors handed out at registration.
pub const AVATAR_COLORS: [&str; 8] = [
    "bg-indigo-600",
    "bg-rose-500",
    "bg-emerald-500",
    "bg-amber-500",
    "bg-cyan-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-teal-500",
];

/// Prefix of generated user ids.
pub const USER_ID_PREFIX: &str = "u_";

/// Number of random characters following [`USER_ID_PREFIX`].
pub const USER_ID_RANDOM_LEN: usize = 8;

pub const USER_NAME_MIN_CHARS: usize = 2;
pub const USER_NAME_MAX_CHARS: usize = 20;
pub const PASSWORD_MIN_CHARS: usize = 6;

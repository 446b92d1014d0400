//! Built-in SQL vocabulary for flat completion.
//!
//! Warehouse dialect keywords and functions. The list may repeat entries
//! (`LEFT` is both a join keyword and a string function); `CompletionSet`
//! dedupes it.

#[rustfmt::skip]
pub const SQL_KEYWORDS: &[&str] = &[
    // Keywords
    "SELECT", "FROM", "WHERE", "AND", "OR", "NOT", "IN", "BETWEEN", "LIKE",
    "IS", "NULL", "AS", "ON", "JOIN", "LEFT", "RIGHT", "INNER", "OUTER",
    "CROSS", "FULL", "GROUP", "BY", "ORDER", "ASC", "DESC", "LIMIT", "OFFSET",
    "HAVING", "DISTINCT", "UNION", "ALL", "EXISTS", "CASE", "WHEN", "THEN",
    "ELSE", "END", "CAST", "IF", "TRUE", "FALSE", "WITH", "OVER", "PARTITION",
    "ROWS", "RANGE", "UNNEST", "EXCEPT", "INTERSECT", "INSERT", "INTO",
    "VALUES", "UPDATE", "SET", "DELETE", "CREATE", "TABLE", "STRUCT", "ARRAY",
    // Aggregates
    "COUNT", "SUM", "AVG", "MIN", "MAX", "ANY_VALUE", "ARRAY_AGG",
    "STRING_AGG", "COUNTIF", "LOGICAL_AND", "LOGICAL_OR", "APPROX_COUNT_DISTINCT",
    "APPROX_QUANTILES", "APPROX_TOP_COUNT", "APPROX_TOP_SUM",
    // Window functions
    "ROW_NUMBER", "RANK", "DENSE_RANK", "PERCENT_RANK", "CUME_DIST",
    "NTILE", "LAG", "LEAD", "FIRST_VALUE", "LAST_VALUE", "NTH_VALUE",
    "PERCENTILE_CONT", "PERCENTILE_DISC",
    // Date and time
    "CURRENT_DATE", "CURRENT_TIMESTAMP", "CURRENT_DATETIME", "CURRENT_TIME",
    "DATE", "DATETIME", "TIME", "TIMESTAMP",
    "DATE_ADD", "DATE_SUB", "DATE_DIFF", "DATE_TRUNC",
    "DATETIME_ADD", "DATETIME_SUB", "DATETIME_DIFF", "DATETIME_TRUNC",
    "TIMESTAMP_ADD", "TIMESTAMP_SUB", "TIMESTAMP_DIFF", "TIMESTAMP_TRUNC",
    "TIME_ADD", "TIME_SUB", "TIME_DIFF", "TIME_TRUNC",
    "EXTRACT", "FORMAT_DATE", "FORMAT_DATETIME", "FORMAT_TIMESTAMP", "FORMAT_TIME",
    "PARSE_DATE", "PARSE_DATETIME", "PARSE_TIMESTAMP", "PARSE_TIME",
    "UNIX_SECONDS", "UNIX_MILLIS", "UNIX_MICROS",
    "TIMESTAMP_SECONDS", "TIMESTAMP_MILLIS", "TIMESTAMP_MICROS",
    // Strings
    "CONCAT", "LENGTH", "LOWER", "UPPER", "TRIM", "LTRIM", "RTRIM",
    "SUBSTR", "SUBSTRING", "REPLACE", "REVERSE", "REPEAT",
    "STARTS_WITH", "ENDS_WITH", "CONTAINS_SUBSTR",
    "REGEXP_CONTAINS", "REGEXP_EXTRACT", "REGEXP_EXTRACT_ALL", "REGEXP_REPLACE",
    "SPLIT", "FORMAT", "LPAD", "RPAD", "LEFT", "RIGHT",
    "SAFE_CONVERT_BYTES_TO_STRING", "TO_CODE_POINTS", "CODE_POINTS_TO_STRING",
    "NORMALIZE", "NORMALIZE_AND_CASEFOLD",
    "BYTE_LENGTH", "CHAR_LENGTH", "CHARACTER_LENGTH",
    // Nulls and casts
    "IFNULL", "NULLIF", "COALESCE", "SAFE_CAST",
    // Math
    "ABS", "SIGN", "ROUND", "TRUNC", "CEIL", "CEILING", "FLOOR",
    "MOD", "DIV", "SAFE_DIVIDE", "SAFE_MULTIPLY", "SAFE_NEGATE", "SAFE_ADD", "SAFE_SUBTRACT",
    "POWER", "POW", "SQRT", "EXP", "LN", "LOG", "LOG10", "LOG2",
    "GREATEST", "LEAST", "IEEE_DIVIDE", "RAND", "GENERATE_ARRAY", "GENERATE_DATE_ARRAY",
    // JSON
    "JSON_EXTRACT", "JSON_EXTRACT_SCALAR", "JSON_EXTRACT_ARRAY",
    "JSON_EXTRACT_STRING_ARRAY", "JSON_VALUE", "JSON_VALUE_ARRAY",
    "JSON_QUERY", "JSON_QUERY_ARRAY", "TO_JSON_STRING", "TO_JSON",
    "PARSE_JSON", "JSON_TYPE",
    // Arrays
    "ARRAY_LENGTH", "ARRAY_TO_STRING", "ARRAY_REVERSE", "ARRAY_CONCAT",
    "GENERATE_ARRAY", "GENERATE_TIMESTAMP_ARRAY",
    // Hashing
    "FARM_FINGERPRINT", "MD5", "SHA1", "SHA256", "SHA512",
    // Misc
    "GENERATE_UUID", "ERROR", "STRUCT", "IF", "IIF", "NULLIF",
];

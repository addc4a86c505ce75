//! Static keyword and operator tables.
//!
//! The base table describes MySQL 5.0; later versions are expressed as
//! revisions adding or removing entries. These tables are data, kept in
//! the same shape an offline generator would emit.

use crate::lexer::TokenFlags;

use super::Family;

const K: TokenFlags = TokenFlags::empty();
const R: TokenFlags = TokenFlags::KEYWORD_RESERVED;
const RC: TokenFlags = R.union(TokenFlags::KEYWORD_COMPOSED);
const RCK: TokenFlags = RC.union(TokenFlags::KEYWORD_KEY);
const RK: TokenFlags = R.union(TokenFlags::KEYWORD_KEY);
const D: TokenFlags = TokenFlags::KEYWORD_DATA_TYPE;
const RD: TokenFlags = R.union(D);
const F: TokenFlags = TokenFlags::KEYWORD_FUNCTION;
const RF: TokenFlags = R.union(F);
const DF: TokenFlags = D.union(F);
const RDF: TokenFlags = RD.union(F);

/// A set of changes applied on top of the base table.
pub(super) struct Revision {
    pub family: Family,
    pub since: u32,
    pub added: &'static [(&'static str, TokenFlags)],
    pub removed: &'static [&'static str],
}

pub(super) static BASE_KEYWORDS: &[(&str, TokenFlags)] = &[
    // Reserved words
    ("ADD", R),
    ("ALL", R),
    ("ALTER", R),
    ("ANALYZE", R),
    ("AND", R),
    ("AS", R),
    ("ASC", R),
    ("ASENSITIVE", R),
    ("BEFORE", R),
    ("BETWEEN", R),
    ("BOTH", R),
    ("BY", R),
    ("CALL", R),
    ("CASCADE", R),
    ("CASE", R),
    ("CHANGE", R),
    ("CHECK", R),
    ("COLLATE", R),
    ("COLUMN", R),
    ("CONDITION", R),
    ("CONSTRAINT", R),
    ("CONTINUE", R),
    ("CONVERT", RF),
    ("CREATE", R),
    ("CROSS", R),
    ("CURRENT_DATE", RF),
    ("CURRENT_TIME", RF),
    ("CURRENT_TIMESTAMP", RF),
    ("CURRENT_USER", RF),
    ("CURSOR", R),
    ("DATABASE", RF),
    ("DATABASES", R),
    ("DAY_HOUR", R),
    ("DAY_MICROSECOND", R),
    ("DAY_MINUTE", R),
    ("DAY_SECOND", R),
    ("DECLARE", R),
    ("DEFAULT", R),
    ("DELAYED", R),
    ("DELETE", R),
    ("DESC", R),
    ("DESCRIBE", R),
    ("DETERMINISTIC", R),
    ("DISTINCT", R),
    ("DISTINCTROW", R),
    ("DIV", R),
    ("DROP", R),
    ("DUAL", R),
    ("EACH", R),
    ("ELSE", R),
    ("ELSEIF", R),
    ("ENCLOSED", R),
    ("ESCAPED", R),
    ("EXISTS", R),
    ("EXIT", R),
    ("EXPLAIN", R),
    ("FETCH", R),
    ("FOR", R),
    ("FORCE", R),
    ("FOREIGN", R),
    ("FROM", R),
    ("FULLTEXT", RK),
    ("GRANT", R),
    ("GROUP", R),
    ("HAVING", R),
    ("HIGH_PRIORITY", R),
    ("HOUR_MICROSECOND", R),
    ("HOUR_MINUTE", R),
    ("HOUR_SECOND", R),
    ("IF", RF),
    ("IGNORE", R),
    ("IN", R),
    ("INDEX", RK),
    ("INFILE", R),
    ("INNER", R),
    ("INOUT", R),
    ("INSENSITIVE", R),
    ("INSERT", RF),
    ("INTERVAL", R),
    ("INTO", R),
    ("IS", R),
    ("ITERATE", R),
    ("JOIN", R),
    ("KEY", RK),
    ("KEYS", R),
    ("KILL", R),
    ("LEADING", R),
    ("LEAVE", R),
    ("LEFT", RF),
    ("LIKE", R),
    ("LIMIT", R),
    ("LINES", R),
    ("LOAD", R),
    ("LOCALTIME", RF),
    ("LOCALTIMESTAMP", RF),
    ("LOCK", R),
    ("LOOP", R),
    ("LOW_PRIORITY", R),
    ("MATCH", R),
    ("MINUTE_MICROSECOND", R),
    ("MINUTE_SECOND", R),
    ("MOD", RF),
    ("MODIFIES", R),
    ("NATURAL", R),
    ("NOT", R),
    ("NO_WRITE_TO_BINLOG", R),
    ("NULL", R),
    ("ON", R),
    ("OPTIMIZE", R),
    ("OPTION", R),
    ("OPTIONALLY", R),
    ("OR", R),
    ("ORDER", R),
    ("OUT", R),
    ("OUTER", R),
    ("OUTFILE", R),
    ("PRIMARY", R),
    ("PROCEDURE", R),
    ("PURGE", R),
    ("READ", R),
    ("READS", R),
    ("REFERENCES", R),
    ("REGEXP", R),
    ("RELEASE", R),
    ("RENAME", R),
    ("REPEAT", RF),
    ("REPLACE", RF),
    ("REQUIRE", R),
    ("RESTRICT", R),
    ("RETURN", R),
    ("REVOKE", R),
    ("RIGHT", RF),
    ("RLIKE", R),
    ("SCHEMA", RF),
    ("SCHEMAS", R),
    ("SELECT", R),
    ("SENSITIVE", R),
    ("SEPARATOR", R),
    ("SET", RD),
    ("SHOW", R),
    ("SPATIAL", RK),
    ("SPECIFIC", R),
    ("SQL", R),
    ("SQLEXCEPTION", R),
    ("SQLSTATE", R),
    ("SQLWARNING", R),
    ("SQL_BIG_RESULT", R),
    ("SQL_CALC_FOUND_ROWS", R),
    ("SQL_SMALL_RESULT", R),
    ("SSL", R),
    ("STARTING", R),
    ("STRAIGHT_JOIN", R),
    ("TABLE", R),
    ("TERMINATED", R),
    ("THEN", R),
    ("TO", R),
    ("TRAILING", R),
    ("TRIGGER", R),
    ("UNDO", R),
    ("UNION", R),
    ("UNIQUE", RK),
    ("UNLOCK", R),
    ("UNSIGNED", R),
    ("UPDATE", R),
    ("USAGE", R),
    ("USE", R),
    ("USING", R),
    ("UTC_DATE", RF),
    ("UTC_TIME", RF),
    ("UTC_TIMESTAMP", RF),
    ("VALUES", RF),
    ("WHEN", R),
    ("WHERE", R),
    ("WHILE", R),
    ("WITH", R),
    ("WRITE", R),
    ("XOR", R),
    ("YEAR_MONTH", R),
    ("ZEROFILL", R),
    // Composed keywords
    ("CHARACTER SET", RC),
    ("CROSS JOIN", RC),
    ("DATA DIRECTORY", RC),
    ("DEFAULT CHARACTER SET", RC),
    ("DEFAULT CHARSET", RC),
    ("DEFAULT COLLATE", RC),
    ("FOR UPDATE", RC),
    ("FULL JOIN", RC),
    ("FULL OUTER JOIN", RC),
    ("GROUP BY", RC),
    ("IF EXISTS", RC),
    ("IF NOT EXISTS", RC),
    ("INDEX DIRECTORY", RC),
    ("INNER JOIN", RC),
    ("LEFT JOIN", RC),
    ("LEFT OUTER JOIN", RC),
    ("LOCK IN SHARE MODE", RC),
    ("NATURAL JOIN", RC),
    ("NATURAL LEFT JOIN", RC),
    ("NATURAL LEFT OUTER JOIN", RC),
    ("NATURAL RIGHT JOIN", RC),
    ("NATURAL RIGHT OUTER JOIN", RC),
    ("NOT IN", RC),
    ("NOT NULL", RC),
    ("ON DELETE", RC),
    ("ON DUPLICATE KEY UPDATE", RC),
    ("ON UPDATE", RC),
    ("ORDER BY", RC),
    ("PARTITION BY", RC),
    ("RIGHT JOIN", RC),
    ("RIGHT OUTER JOIN", RC),
    ("UNION ALL", RC),
    ("UNION DISTINCT", RC),
    ("WITH PARSER", RC),
    ("WITH ROLLUP", RC),
    // Key definitions
    ("FOREIGN KEY", RCK),
    ("FULLTEXT INDEX", RCK),
    ("FULLTEXT KEY", RCK),
    ("PRIMARY KEY", RCK),
    ("SPATIAL INDEX", RCK),
    ("SPATIAL KEY", RCK),
    ("UNIQUE INDEX", RCK),
    ("UNIQUE KEY", RCK),
    // Data types
    ("BIGINT", RD),
    ("BINARY", RD),
    ("BIT", D),
    ("BLOB", RD),
    ("BOOL", D),
    ("BOOLEAN", D),
    ("CHAR", RDF),
    ("CHARACTER", RD),
    ("DATE", DF),
    ("DATETIME", D),
    ("DEC", RD),
    ("DECIMAL", RD),
    ("DOUBLE", RD),
    ("ENUM", D),
    ("FLOAT", RD),
    ("FLOAT4", RD),
    ("FLOAT8", RD),
    ("GEOMETRY", D),
    ("INT", RD),
    ("INT1", RD),
    ("INT2", RD),
    ("INT3", RD),
    ("INT4", RD),
    ("INT8", RD),
    ("INTEGER", RD),
    ("LINESTRING", D),
    ("LONG", RD),
    ("LONGBLOB", RD),
    ("LONGTEXT", RD),
    ("MEDIUMBLOB", RD),
    ("MEDIUMINT", RD),
    ("MEDIUMTEXT", RD),
    ("MIDDLEINT", RD),
    ("NUMERIC", RD),
    ("POINT", D),
    ("POLYGON", D),
    ("REAL", RD),
    ("SERIAL", D),
    ("SMALLINT", RD),
    ("TEXT", D),
    ("TIME", DF),
    ("TIMESTAMP", DF),
    ("TINYBLOB", RD),
    ("TINYINT", RD),
    ("TINYTEXT", RD),
    ("VARBINARY", RD),
    ("VARCHAR", RD),
    ("VARCHARACTER", RD),
    ("YEAR", DF),
    // Functions
    ("ABS", F),
    ("AVG", F),
    ("CAST", F),
    ("CEIL", F),
    ("COALESCE", F),
    ("CONCAT", F),
    ("CONCAT_WS", F),
    ("COUNT", F),
    ("DATE_ADD", F),
    ("DATE_FORMAT", F),
    ("DATE_SUB", F),
    ("FLOOR", F),
    ("FOUND_ROWS", F),
    ("FROM_UNIXTIME", F),
    ("GROUP_CONCAT", F),
    ("IFNULL", F),
    ("LAST_INSERT_ID", F),
    ("LENGTH", F),
    ("LOWER", F),
    ("MAX", F),
    ("MD5", F),
    ("MIN", F),
    ("NOW", F),
    ("RAND", F),
    ("ROUND", F),
    ("SHA1", F),
    ("SUBSTRING", F),
    ("SUM", F),
    ("TRIM", F),
    ("UNIX_TIMESTAMP", F),
    ("UPPER", F),
    ("USER", F),
    ("VERSION", F),
    // Non-reserved words
    ("ACTION", K),
    ("AFTER", K),
    ("AGAINST", K),
    ("ALGORITHM", K),
    ("AUTO_INCREMENT", K),
    ("AVG_ROW_LENGTH", K),
    ("BEGIN", K),
    ("BTREE", K),
    ("CASCADED", K),
    ("CHARSET", K),
    ("CHECKSUM", K),
    ("COLUMNS", K),
    ("COLUMN_FORMAT", K),
    ("COMMENT", K),
    ("COMMIT", K),
    ("COMPACT", K),
    ("COMPRESSED", K),
    ("CONNECTION", K),
    ("DATA", K),
    ("DAY", K),
    ("DEFINER", K),
    ("DELAY_KEY_WRITE", K),
    ("DELIMITER", K),
    ("DIRECTORY", K),
    ("DISABLE", K),
    ("DISK", K),
    ("DO", K),
    ("DUMPFILE", K),
    ("DUPLICATE", K),
    ("DYNAMIC", K),
    ("ENABLE", K),
    ("END", K),
    ("ENGINE", K),
    ("ESCAPE", K),
    ("EXCEPT", K),
    ("FIELDS", K),
    ("FIRST", K),
    ("FIXED", K),
    ("FULL", K),
    ("GLOBAL", K),
    ("HASH", K),
    ("HOUR", K),
    ("INTERSECT", K),
    ("INVISIBLE", K),
    ("INVOKER", K),
    ("ISOLATION", K),
    ("KEY_BLOCK_SIZE", K),
    ("LAST", K),
    ("LEVEL", K),
    ("LOCAL", K),
    ("MAX_ROWS", K),
    ("MEMORY", K),
    ("MERGE", K),
    ("MICROSECOND", K),
    ("MINUTE", K),
    ("MIN_ROWS", K),
    ("MODE", K),
    ("MONTH", K),
    ("NAMES", K),
    ("NO", K),
    ("OFFSET", K),
    ("OPEN", K),
    ("PACK_KEYS", K),
    ("PARSER", K),
    ("PARTITION", K),
    ("PASSWORD", K),
    ("QUARTER", K),
    ("QUICK", K),
    ("REDUNDANT", K),
    ("ROLLBACK", K),
    ("ROLLUP", K),
    ("ROW_FORMAT", K),
    ("SAVEPOINT", K),
    ("SECOND", K),
    ("SECURITY", K),
    ("SESSION", K),
    ("SHARE", K),
    ("SIGNED", K),
    ("SQL_BUFFER_RESULT", K),
    ("SQL_CACHE", K),
    ("SQL_NO_CACHE", K),
    ("START", K),
    ("STATUS", K),
    ("STORAGE", K),
    ("STORED", K),
    ("TABLES", K),
    ("TEMPORARY", K),
    ("TRANSACTION", K),
    ("TRUNCATE", K),
    ("USE_FRM", K),
    ("VALUE", K),
    ("VARIABLES", K),
    ("VIEW", K),
    ("VIRTUAL", K),
    ("VISIBLE", K),
    ("WARNINGS", K),
    ("WEEK", K),
    ("WORK", K),
];

pub(super) static REVISIONS: &[Revision] = &[
    Revision {
        family: Family::MySql,
        since: 50100,
        added: &[
            ("ACCESSIBLE", R),
            ("EVENT", K),
            ("LINEAR", R),
            ("MASTER_SSL_VERIFY_SERVER_CERT", R),
            ("PLUGIN", K),
            ("RANGE", R),
            ("READ_WRITE", R),
        ],
        removed: &[],
    },
    Revision {
        family: Family::MySql,
        since: 50500,
        added: &[
            ("GENERAL", R),
            ("IGNORE_SERVER_IDS", R),
            ("MASTER_HEARTBEAT_PERIOD", R),
            ("MAXVALUE", R),
            ("RESIGNAL", R),
            ("SIGNAL", R),
            ("SLOW", R),
        ],
        removed: &[],
    },
    Revision {
        family: Family::MySql,
        since: 50600,
        added: &[
            ("GET", R),
            ("IO_AFTER_GTIDS", R),
            ("IO_BEFORE_GTIDS", R),
            ("MASTER_BIND", R),
            ("ONE_SHOT", R),
            ("PARTITION", R),
            ("SQL_AFTER_GTIDS", R),
            ("SQL_BEFORE_GTIDS", R),
        ],
        removed: &[],
    },
    Revision {
        family: Family::MySql,
        since: 50700,
        added: &[
            ("ACCOUNT", K),
            ("GENERATED", R),
            ("JSON", D),
            ("OPTIMIZER_COSTS", R),
            ("STORED", R),
            ("VIRTUAL", R),
        ],
        removed: &["ONE_SHOT"],
    },
    Revision {
        family: Family::MySql,
        since: 80000,
        added: &[
            ("CUME_DIST", RF),
            ("DENSE_RANK", RF),
            ("EMPTY", R),
            ("EXCEPT", R),
            ("FIRST_VALUE", RF),
            ("GROUPING", RF),
            ("GROUPS", R),
            ("INVISIBLE", K),
            ("JSON_TABLE", RF),
            ("LAG", RF),
            ("LAST_VALUE", RF),
            ("LATERAL", R),
            ("LEAD", RF),
            ("NTH_VALUE", RF),
            ("NTILE", RF),
            ("OF", R),
            ("OVER", R),
            ("PERCENT_RANK", RF),
            ("RANK", RF),
            ("RECURSIVE", R),
            ("ROW", R),
            ("ROWS", R),
            ("ROW_NUMBER", RF),
            ("SYSTEM", R),
            ("VISIBLE", K),
            ("WINDOW", R),
        ],
        removed: &[],
    },
    Revision {
        family: Family::MariaDb,
        since: 100_000,
        added: &[
            ("ACCESSIBLE", R),
            ("GENERAL", R),
            ("GET", R),
            ("IGNORE_SERVER_IDS", R),
            ("LINEAR", R),
            ("MASTER_HEARTBEAT_PERIOD", R),
            ("MAXVALUE", R),
            ("PARTITION", R),
            ("RANGE", R),
            ("READ_WRITE", R),
            ("RESIGNAL", R),
            ("ROLE", K),
            ("SIGNAL", R),
            ("SLOW", R),
        ],
        removed: &[],
    },
    Revision {
        family: Family::MariaDb,
        since: 100_200,
        added: &[
            ("JSON", D),
            ("OVER", R),
            ("RECURSIVE", R),
            ("ROWS", R),
            ("WINDOW", R),
        ],
        removed: &[],
    },
    Revision {
        family: Family::MariaDb,
        since: 100_300,
        added: &[("EXCEPT", R), ("INTERSECT", R), ("SEQUENCE", K)],
        removed: &[],
    },
    Revision {
        family: Family::MariaDb,
        since: 100_600,
        added: &[("JSON_TABLE", F), ("OFFSET", R)],
        removed: &[],
    },
];

pub(super) static OPERATORS: &[(&str, TokenFlags)] = &[
    ("%", TokenFlags::OPERATOR_ARITHMETIC),
    ("*", TokenFlags::OPERATOR_ARITHMETIC),
    ("+", TokenFlags::OPERATOR_ARITHMETIC),
    ("-", TokenFlags::OPERATOR_ARITHMETIC),
    ("/", TokenFlags::OPERATOR_ARITHMETIC),
    ("!", TokenFlags::OPERATOR_LOGICAL),
    ("!=", TokenFlags::OPERATOR_LOGICAL),
    ("&&", TokenFlags::OPERATOR_LOGICAL),
    ("<", TokenFlags::OPERATOR_LOGICAL),
    ("<=", TokenFlags::OPERATOR_LOGICAL),
    ("<=>", TokenFlags::OPERATOR_LOGICAL),
    ("<>", TokenFlags::OPERATOR_LOGICAL),
    ("=", TokenFlags::OPERATOR_LOGICAL),
    (">", TokenFlags::OPERATOR_LOGICAL),
    (">=", TokenFlags::OPERATOR_LOGICAL),
    ("||", TokenFlags::OPERATOR_LOGICAL),
    ("&", TokenFlags::OPERATOR_BITWISE),
    ("<<", TokenFlags::OPERATOR_BITWISE),
    (">>", TokenFlags::OPERATOR_BITWISE),
    ("^", TokenFlags::OPERATOR_BITWISE),
    ("|", TokenFlags::OPERATOR_BITWISE),
    ("~", TokenFlags::OPERATOR_BITWISE),
    (":=", TokenFlags::OPERATOR_ASSIGNMENT),
    ("(", TokenFlags::OPERATOR_SQL),
    (")", TokenFlags::OPERATOR_SQL),
    (",", TokenFlags::OPERATOR_SQL),
    (".", TokenFlags::OPERATOR_SQL),
    (";", TokenFlags::OPERATOR_SQL),
    ("->", TokenFlags::OPERATOR_SQL),
    ("->>", TokenFlags::OPERATOR_SQL),
];

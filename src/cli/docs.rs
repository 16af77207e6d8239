//! Documentation content for the mongosql CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Select,
    Aggregate,
    Operators,
    Strings,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "lexical" => Some(Self::Syntax),
            "select" | "find" => Some(Self::Select),
            "aggregate" | "aggregation" | "pipeline" | "stages" => Some(Self::Aggregate),
            "operators" | "ops" | "expressions" => Some(Self::Operators),
            "strings" | "string" | "escapes" => Some(Self::Strings),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"MONGOSQL DOCUMENTATION

MongoSQL is a SQL-like language compiled into document-store queries. A SELECT
becomes a find request (filter, projection, limit, skip, sort); an AGGREGATE
becomes an ordered pipeline of stage documents.

DOCUMENTATION CATEGORIES

  syntax       Tokens, literals, symbols, keywords and comments
  select       SELECT ... FROM ... and its clauses
  aggregate    AGGREGATE ... and pipeline stages
  operators    Precedence and how each operator is translated
  strings      String literals and escape sequences

QUICK REFERENCE

  SELECT * FROM coll WHERE a == 1        {"filter": {"a": 1}}
  SELECT a, b FROM coll SORT a DESC      projection + sort
  AGGREGATE coll PROJECT a = 1           [{"$project": {"a": 1}}]
  '$field'                               field reference in expressions

Run 'mongosql doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Select) => Ok(SELECT_DOC),
        Some(DocCategory::Aggregate) => Ok(AGGREGATE_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Strings) => Ok(STRINGS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX

LITERALS
    42            integer
    3.14          float (digits on both sides of the dot, no exponent)
    'text' "text" string
    true false    booleans (lowercase only)
    null          null (lowercase only)
    -5            unary minus applied to 5

SYMBOLS
    Letters, digits and underscores, not starting with a digit, optionally
    joined by dots: price, _id, author.name

    A symbol always means a bare name. It is used for collections, selected
    fields, sort fields and the left side of comparisons.

KEYWORDS (case-insensitive)
    SELECT FROM WHERE ORDER BY AS AND OR NOT IN ASC DESC
    AGGREGATE PROJECT MATCH LIMIT SKIP UNWIND GROUP SORT GEO_NEAR

MAPS AND LISTS
    {}                       empty document
    {a = 1, b = 'x'}         assignment style
    {a: 1, "b c": 2}         JSON style (keys may be strings)
    [1, 2, 3,]               trailing commas are allowed

COMMENTS
    // to end of line
    #  to end of line
    -- to end of line
    /* block */              may span lines; does not nest

STATEMENTS
    A statement is a SELECT, an AGGREGATE or a bare expression, optionally
    followed by semicolons.

    Parentheses, maps, lists, calls and prefix operators nest at most 64
    levels deep.
"#;

const SELECT_DOC: &str = r#"SELECT

    SELECT <* | field, field, ...> FROM <collection>
        [WHERE <condition>]
        [LIMIT <integer>]
        [SKIP <integer>]
        [SORT <field> [ASC|DESC], ...]
        [ORDER BY <field> [ASC|DESC], ...]

Clauses after FROM may appear in any order. Repeating a clause replaces the
earlier one.

OUTPUT
    {"filter": ..., "projection": [...], "limit": n, "skip": n, "sort": {...}}

    Only clauses that are present appear. SELECT * has no projection.

EXAMPLE
    SELECT field, field1 FROM mycollection
    WHERE field == 'value' LIMIT 100 SKIP 20 SORT field1 ASC, field2 DESC

    => {"filter": {"field": "value"}, "projection": ["field", "field1"],
        "limit": 100, "skip": 20, "sort": {"field1": 1, "field2": -1}}
"#;

const AGGREGATE_DOC: &str = r#"AGGREGATE

    AGGREGATE <collection> <stage> <stage> ...

Every stage clause appends one stage to the pipeline, in order.

STAGES
    PROJECT a = 1, expr AS b     {"$project": {"a": 1, "b": ...}}
    MATCH <condition>            {"$match": ...}
    LIMIT <integer>              {"$limit": n}
    SKIP <integer>               {"$skip": n}
    SORT a DESC                  {"$sort": {"a": -1}}
    ORDER BY a DESC              same as SORT
    UNWIND '$tags'               {"$unwind": "$tags"}
    GROUP _id = '$author', n = sum(1)
                                 {"$group": {"_id": "$author", "n": {"$sum": [1]}}}
    GEO_NEAR {near = [0, 0], distanceField = 'd'}
                                 {"$geoNear": {...}}

FIELD REFERENCES
    Write fields as '$name' strings inside stage expressions:

    AGGREGATE article PROJECT title = 1, doctoredPageViews = "$pageViews" + 10

    => {"aggregate": "article", "pipeline": [{"$project": {"title": 1,
        "doctoredPageViews": {"$add": ["$pageViews", 10]}}}]}

Repeated names in one PROJECT keep the last value.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

PRECEDENCE (lowest to highest, all left-associative)
    OR
    AND
    == != IN < <= > >=
    + -
    * / %
    NOT, unary -     (bind tighter than everything else)

    Use parentheses for NOT over a comparison: NOT (a == 1)

COMPARISONS (left side must be a field name)
    a == v     {"a": v}
    a != v     {"a": {"$ne": v}}
    a < v      {"a": {"$lt": v}}
    a <= v     {"a": {"$lte": v}}
    a > v      {"a": {"$gt": v}}
    a >= v     {"a": {"$gte": v}}
    a IN [..]  {"a": {"$in": [..]}}

LOGICAL
    a AND b AND c    {"$and": [a, b, c]}      chains are flattened
    a OR b           {"$or": [a, b]}
    NOT x            {"$not": x}

ARITHMETIC
    x + y  {"$add": [x, y]}         x - y  {"$subtract": [x, y]}
    x * y  {"$multiply": [x, y]}    x / y  {"$divide": [x, y]}
    x % y  {"$mod": [x, y]}

FUNCTIONS
    name(a, b)   {"$name": [a, b]}
"#;

const STRINGS_DOC: &str = r#"STRINGS

Strings use single or double quotes and may not span lines.

ESCAPES
    \n \t \r         newline, tab, carriage return
    \b \f \v \a      backspace, form feed, vertical tab, bell
    \' \" \\         quote characters and backslash
    \x41             hexadecimal code point  (A)
    \65              decimal code point      (A)
    \. \_ \~ ...     any other letter or one of . _ ~ ! = & ^ - ? stands
                     for itself

Any other character after a backslash is an error.
"#;

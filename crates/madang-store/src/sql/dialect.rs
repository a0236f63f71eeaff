use sqlx::mysql::MySqlQueryResult;
use sqlx::postgres::PgQueryResult;
use sqlx::{Database, MySql, Postgres, QueryBuilder};

/// Engine-specific SQL used by [`super::SqlxSink`].
///
/// Reads cast identities and counts to 64-bit integers so one row type
/// decodes on every engine.
pub trait Dialect: Database {
    const ENGINE: &'static str;
    /// `(bookid, price)` ordered by `bookid`.
    const SELECT_BOOKS: &'static str;
    /// `(custid,)` ordered by `custid`.
    const SELECT_CUSTOMERS: &'static str;
    /// `(role, count)` grouped by role.
    const COUNT_ROLES: &'static str;
    /// `(custid, name, address, role)` for admins and managers, ordered by `custid`.
    const SELECT_STAFF: &'static str;

    fn rows_affected(result: &Self::QueryResult) -> u64;

    /// Append the `custid` filter of a role update, binding `ids`.
    fn push_customer_filter(builder: &mut QueryBuilder<'_, Self>, ids: &[i64]);
}

impl Dialect for MySql {
    const ENGINE: &'static str = "mysql";
    const SELECT_BOOKS: &'static str = r#"
        SELECT CAST(bookid AS SIGNED), CAST(COALESCE(price, 0) AS SIGNED)
        FROM Book
        ORDER BY bookid
        "#;
    const SELECT_CUSTOMERS: &'static str = r#"
        SELECT CAST(custid AS SIGNED)
        FROM Customer
        ORDER BY custid
        "#;
    const COUNT_ROLES: &'static str = r#"
        SELECT CAST(role AS CHAR), COUNT(*)
        FROM Customer
        GROUP BY role
        "#;
    const SELECT_STAFF: &'static str = r#"
        SELECT CAST(custid AS SIGNED), name, address, CAST(role AS CHAR)
        FROM Customer
        WHERE role IN ('admin', 'manager')
        ORDER BY custid
        "#;

    fn rows_affected(result: &MySqlQueryResult) -> u64 {
        result.rows_affected()
    }

    fn push_customer_filter(builder: &mut QueryBuilder<'_, Self>, ids: &[i64]) {
        builder.push(" WHERE custid IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");
    }
}

/// Integer binds are sent as `int8`; Postgres applies the assignment cast to
/// narrower columns.
impl Dialect for Postgres {
    const ENGINE: &'static str = "postgres";
    const SELECT_BOOKS: &'static str = r#"
        select bookid::int8, coalesce(price, 0)::int8
        from book
        order by bookid
        "#;
    const SELECT_CUSTOMERS: &'static str = r#"
        select custid::int8
        from customer
        order by custid
        "#;
    const COUNT_ROLES: &'static str = r#"
        select role::text, count(*)
        from customer
        group by role
        "#;
    const SELECT_STAFF: &'static str = r#"
        select custid::int8, name::text, address::text, role::text
        from customer
        where role in ('admin', 'manager')
        order by custid
        "#;

    fn rows_affected(result: &PgQueryResult) -> u64 {
        result.rows_affected()
    }

    fn push_customer_filter(builder: &mut QueryBuilder<'_, Self>, ids: &[i64]) {
        builder.push(" where custid = any(");
        builder.push_bind(ids.to_vec());
        builder.push(")");
    }
}

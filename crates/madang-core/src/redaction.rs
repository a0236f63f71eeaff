use serde::{Deserialize, Serialize};

/// Connection metadata safe to log or write into run artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactedConnection {
    pub engine: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub redacted: String,
}

/// Mask the password and sensitive query parameters of a connection URL.
pub fn redact_connection_string(conn: &str) -> RedactedConnection {
    let Some((scheme, rest)) = conn.split_once("://") else {
        return RedactedConnection {
            engine: None,
            user: None,
            host: None,
            port: None,
            database: None,
            redacted: redact_query(conn),
        };
    };

    let (authority_and_path, query) = match rest.split_once('?') {
        Some((head, query)) => (head, Some(query)),
        None => (rest, None),
    };
    let (userinfo, location) = match authority_and_path.rsplit_once('@') {
        Some((userinfo, location)) => (Some(userinfo), location),
        None => (None, authority_and_path),
    };

    let (user, masked_userinfo) = match userinfo {
        Some(info) => match info.split_once(':') {
            Some((user, _password)) => (Some(user.to_string()), Some(format!("{user}:***"))),
            None => (Some(info.to_string()), Some(info.to_string())),
        },
        None => (None, None),
    };

    let (host_port, database) = match location.split_once('/') {
        Some((host_port, path)) if !path.is_empty() => (host_port, Some(path.to_string())),
        Some((host_port, _)) => (host_port, None),
        None => (location, None),
    };
    let (host, port) = match host_port.rsplit_once(':') {
        Some((host, port)) => (host.to_string(), port.parse::<u16>().ok()),
        None => (host_port.to_string(), None),
    };

    let mut redacted = format!("{scheme}://");
    if let Some(info) = &masked_userinfo {
        redacted.push_str(info);
        redacted.push('@');
    }
    redacted.push_str(location);
    if let Some(query) = query {
        redacted.push('?');
        redacted.push_str(&redact_params(query));
    }

    RedactedConnection {
        engine: Some(scheme.to_string()),
        user,
        host: (!host.is_empty()).then_some(host),
        port,
        database,
        redacted,
    }
}

fn redact_query(conn: &str) -> String {
    match conn.split_once('?') {
        Some((base, query)) => format!("{base}?{}", redact_params(query)),
        None => conn.to_string(),
    }
}

fn redact_params(query: &str) -> String {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if is_sensitive_key(key) => format!("{key}=***"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn is_sensitive_key(key: &str) -> bool {
    matches!(
        key.to_lowercase().as_str(),
        "password" | "pass" | "pwd" | "token" | "api_key" | "apikey"
    )
}

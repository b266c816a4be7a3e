//! # URL parsing
//!
//! A small, dependency-free parser for the URLs people type at a prompt.
//!
//! **Accepts:**
//! - an optional scheme: `http`, `https`, `ftp`, `ftps`, `ws`, `wss`
//! - `mailto:` followed by an email address
//! - hosts given as DNS names, IPv4 or bracketed IPv6 addresses
//! - an optional port and an optional path/query/fragment
//!
//! Without a scheme the host must look like a real address (`google.com`,
//! `127.0.0.1`, `localhost`), so a lone word is not taken for a URL.
//!
//! ## Example
//!
//! ```rust
//! use inputplus::utils::{ParsedUrl, TargetType};
//!
//! let url = ParsedUrl::new("https://example.com:8080/api").unwrap();
//! assert_eq!(url.port, Some(8080));
//! assert_eq!(url.path, "/api");
//!
//! let bare: ParsedUrl = "google.com".parse().unwrap();
//! assert_eq!(bare.scheme, None);
//!
//! let mail = ParsedUrl::try_from("mailto:al@inventwithpython.com").unwrap();
//! assert_eq!(mail.target_type, TargetType::Mailbox);
//! ```
use std::str::FromStr;
use std::{
    error::Error,
    fmt::Display,
    net::{Ipv4Addr, Ipv6Addr},
};

/// A URL accepted by [`ParsedUrl::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: Option<Scheme>,
    pub target: String,
    pub target_type: TargetType,
    pub port: Option<u16>,
    /// Everything after the authority, including query and fragment.
    pub path: String,
    /// Normalized form: lowercase scheme, then host, port and path as typed.
    pub full_url: String,
}

impl Display for ParsedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
    Ftp,
    Ftps,
    Ws,
    Wss,
    Mailto,
}

impl Scheme {
    fn from_name(name: &str) -> Option<Scheme> {
        match name.to_ascii_lowercase().as_str() {
            "http" => Some(Scheme::Http),
            "https" => Some(Scheme::Https),
            "ftp" => Some(Scheme::Ftp),
            "ftps" => Some(Scheme::Ftps),
            "ws" => Some(Scheme::Ws),
            "wss" => Some(Scheme::Wss),
            _ => None,
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Https => write!(f, "https"),
            Self::Ftp => write!(f, "ftp"),
            Self::Ftps => write!(f, "ftps"),
            Self::Ws => write!(f, "ws"),
            Self::Wss => write!(f, "wss"),
            Self::Mailto => write!(f, "mailto"),
        }
    }
}

/// What the host part of a URL turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    Dns,
    IPv4,
    IPv6,
    /// The address of a `mailto:` URL.
    Mailbox,
}

impl Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dns => write!(f, "dns"),
            Self::IPv4 => write!(f, "ipv4"),
            Self::IPv6 => write!(f, "ipv6"),
            Self::Mailbox => write!(f, "mailbox"),
        }
    }
}

impl TargetType {
    /// Checks if the provided string is a valid DNS name.
    ///
    /// # Rules
    /// - Maximum length: 253 characters
    /// - Each label ≤ 63 characters
    /// - Cannot start or end with `-`
    /// - Only ASCII alphanumeric characters and `-` allowed
    pub fn is_dns(target: &str) -> Result<TargetType, UrlErrors> {
        if target.is_empty() || target.len() > 253 {
            return Err(UrlErrors::InvalidTargetType);
        }

        let valid: bool = target.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

        if valid {
            Ok(TargetType::Dns)
        } else {
            Err(UrlErrors::InvalidTargetType)
        }
    }

    /// Checks if the provided string is a valid IPv4 address.
    pub fn is_ipv4(target: &str) -> Result<TargetType, UrlErrors> {
        match Ipv4Addr::from_str(target) {
            Ok(_) => Ok(TargetType::IPv4),
            Err(_) => Err(UrlErrors::InvalidTargetType),
        }
    }

    /// Checks if the provided string is a valid IPv6 address, with or without brackets.
    pub fn is_ipv6(target: &str) -> Result<TargetType, UrlErrors> {
        let clean_ip = target.trim_matches(['[', ']'].as_ref());
        match Ipv6Addr::from_str(clean_ip) {
            Ok(_) => Ok(TargetType::IPv6),
            Err(_) => Err(UrlErrors::InvalidTargetType),
        }
    }
}

/// Checks `local@domain` with a conservative local part and a dotted DNS domain.
pub fn is_email(address: &str) -> bool {
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_.+-".contains(c));

    local_ok && domain.contains('.') && TargetType::is_dns(domain).is_ok()
}

/// Represents possible errors when parsing a URL.
#[derive(Debug, PartialEq, Eq)]
pub enum UrlErrors {
    UrlEmpty,
    InvalidCharacter,
    InvalidScheme,
    InvalidTargetType,
    InvalidPort,
    InvalidMailbox,
}

impl Display for UrlErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UrlEmpty => {
                write!(f, "The url is empty")
            }
            Self::InvalidCharacter => {
                write!(f, "The url contains whitespace or control characters")
            }
            Self::InvalidScheme => {
                write!(f, "Invalid scheme => http, https, ftp, ftps, ws, wss or mailto")
            }
            Self::InvalidTargetType => {
                write!(f, "Invalid target type => Must be a DNS or IPV4 OR IPV6")
            }
            Self::InvalidPort => {
                write!(f, "Invalid port => (1 -> 65,535)")
            }
            Self::InvalidMailbox => {
                write!(f, "Invalid mailto address")
            }
        }
    }
}

impl Error for UrlErrors {}

impl std::str::FromStr for ParsedUrl {
    type Err = UrlErrors;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParsedUrl::new(s)
    }
}

impl TryFrom<&str> for ParsedUrl {
    type Error = UrlErrors;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ParsedUrl::new(value)
    }
}

impl ParsedUrl {
    /// Parses a URL typed at a prompt.
    ///
    /// # Errors
    /// Returns [`UrlErrors`] if:
    /// - The URL is empty or contains whitespace
    /// - The scheme is not supported
    /// - The host is invalid
    /// - The port is not in `1..=65535`
    pub fn new(input_url: &str) -> Result<ParsedUrl, UrlErrors> {
        let url = input_url;

        if url.is_empty() {
            return Err(UrlErrors::UrlEmpty);
        }
        if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(UrlErrors::InvalidCharacter);
        }

        let mailto = url
            .get(..7)
            .filter(|scheme| scheme.eq_ignore_ascii_case("mailto:"))
            .and_then(|_| url.get(7..))
            .filter(|address| !address.is_empty());
        if let Some(address) = mailto {
            if !is_email(address) {
                return Err(UrlErrors::InvalidMailbox);
            }
            return Ok(ParsedUrl {
                scheme: Some(Scheme::Mailto),
                target: address.to_string(),
                target_type: TargetType::Mailbox,
                port: None,
                path: String::new(),
                full_url: format!("mailto:{}", address),
            });
        }

        let (scheme, rest) = match url.split_once("://") {
            Some((name, rest)) => (
                Some(Scheme::from_name(name).ok_or(UrlErrors::InvalidScheme)?),
                rest,
            ),
            None => (None, url),
        };

        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let (authority, path) = rest.split_at(authority_end);

        let (target, port_text) = if authority.starts_with('[') {
            let close = authority.find(']').ok_or(UrlErrors::InvalidTargetType)?;
            let (host, after) = authority.split_at(close + 1);
            match after {
                "" => (host, None),
                _ => (
                    host,
                    Some(after.strip_prefix(':').ok_or(UrlErrors::InvalidPort)?),
                ),
            }
        } else {
            match authority.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (authority, None),
            }
        };

        let target_type: TargetType = if target.starts_with('[') {
            TargetType::is_ipv6(target)?
        } else {
            TargetType::is_ipv4(target).or(TargetType::is_dns(target))?
        };

        if scheme.is_none()
            && target_type == TargetType::Dns
            && !target.contains('.')
            && !target.eq_ignore_ascii_case("localhost")
        {
            return Err(UrlErrors::InvalidTargetType);
        }

        let port: Option<u16> = match port_text {
            None => None,
            Some(text) => match text.parse::<u16>() {
                Ok(0) | Err(_) => return Err(UrlErrors::InvalidPort),
                Ok(port) => Some(port),
            },
        };

        let full_url = format!(
            "{}{}{}{}",
            match scheme {
                Some(s) => format!("{}://", s),
                None => String::new(),
            },
            target,
            match port {
                Some(n) => format!(":{}", n),
                None => String::new(),
            },
            path
        );

        Ok(ParsedUrl {
            scheme,
            target: target.to_string(),
            target_type,
            port,
            path: path.to_string(),
            full_url,
        })
    }
}

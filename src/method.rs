//! HTTP method as a typed enum.
//!
//! Only the five methods a route descriptor can name. Anything else arriving
//! on the wire is rejected by the server with `405 Method Not Allowed` before
//! it reaches a router.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A routable HTTP method.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Delete,
    Get,
    Patch,
    Post,
    Put,
}

impl Method {
    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Get    => "GET",
            Self::Patch  => "PATCH",
            Self::Post   => "POST",
            Self::Put    => "PUT",
        }
    }
}

/// Parses a method name in any ASCII case, so `"get"` and `"GET"` agree.
impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Delete, Self::Get, Self::Patch, Self::Post, Self::Put]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownMethod(s.to_owned()))
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = Error;

    fn try_from(m: &http::Method) -> Result<Self, Self::Error> {
        match *m {
            http::Method::DELETE => Ok(Self::Delete),
            http::Method::GET    => Ok(Self::Get),
            http::Method::PATCH  => Ok(Self::Patch),
            http::Method::POST   => Ok(Self::Post),
            http::Method::PUT    => Ok(Self::Put),
            _ => Err(Error::UnknownMethod(m.as_str().to_owned())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

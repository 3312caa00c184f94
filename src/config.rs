//! Configuração do servidor lida do ambiente.
//!
//! | Variável | Padrão | Uso |
//! |----------|--------|-----|
//! | `EXTRATOR_ADDR` | `0.0.0.0:3000` | endereço de escuta |
//! | `EXTRATOR_MAX_UPLOAD_MB` | `50` | limite do corpo das requisições |
//! | `RUST_LOG` | `info` | filtro do `tracing_subscriber` |

use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const ADDR_VAR: &str = "EXTRATOR_ADDR";
pub const MAX_UPLOAD_VAR: &str = "EXTRATOR_MAX_UPLOAD_MB";

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_UPLOAD_MB: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de consulta, para que
    /// os testes não dependam do ambiente do processo.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr_text = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_text
            .parse::<SocketAddr>()
            .with_context(|| format!("{ADDR_VAR} inválido: {addr_text}"))?;

        let max_upload_mb = match lookup(MAX_UPLOAD_VAR) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{MAX_UPLOAD_VAR} inválido: {value}"))?,
            None => DEFAULT_MAX_UPLOAD_MB,
        };

        Ok(Self {
            addr,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}

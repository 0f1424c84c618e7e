use serde::Serialize;

/// Liveness payload; rendered as plain text by `/healthz`.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub const OK: Health = Health { status: "ok" };
}

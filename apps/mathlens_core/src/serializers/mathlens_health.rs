use serde::Serialize;

#[derive(Serialize)]
pub struct Banner { pub message: &'static str }

#[derive(Serialize)]
pub struct Health { pub ok: bool, pub service: &'static str }

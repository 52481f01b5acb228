//! `SeaORM` entities for the condominium schema.

pub mod prelude;

pub mod auth_tokens;
pub mod condominio;
pub mod credito_a_favor;
pub mod cuenta;
pub mod inmueble;
pub mod moneda;
pub mod notificacion_cobro;
pub mod pago_reportado_app;
pub mod propietario_inmueble;
pub mod tipo_cambio;

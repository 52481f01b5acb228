//! Entity re-exports.

pub use super::auth_tokens::Entity as AuthTokens;
pub use super::condominio::Entity as Condominio;
pub use super::credito_a_favor::Entity as CreditoAFavor;
pub use super::cuenta::Entity as Cuenta;
pub use super::inmueble::Entity as Inmueble;
pub use super::moneda::Entity as Moneda;
pub use super::notificacion_cobro::Entity as NotificacionCobro;
pub use super::pago_reportado_app::Entity as PagoReportadoApp;
pub use super::propietario_inmueble::Entity as PropietarioInmueble;
pub use super::tipo_cambio::Entity as TipoCambio;

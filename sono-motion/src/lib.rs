//! # 🛏️ sono-motion — Movimento e Postura
//!
//! Transforma a leitura do acelerômetro em duas informações:
//!
//! - **Postura** ([`PositionClassifier`]): inclinação `atan2(y, z)` classificada
//!   em costas, lado, bruços ou desconhecida. Sem estado.
//! - **Inquietação** ([`RestlessnessTracker`]): contador de movimentos numa
//!   janela deslizante que decide quando sinalizar um ajuste da almofada.
//!
//! ## Exemplo
//!
//! ```
//! use sono_motion::{PositionClassifier, RestlessnessTracker};
//! use sono_core::prelude::*;
//!
//! let classifier = PositionClassifier::new();
//! let position = classifier.classify(&RawSample::at_rest(0));
//! assert_eq!(position.posture, Posture::Back);
//!
//! let mut tracker = RestlessnessTracker::new(Default::default(), 0).unwrap();
//! let decision = tracker.observe(2.0, 100, &Cooldown::new(600_000));
//! assert!(!decision.should_adjust);
//! ```

pub mod error;
pub mod position;
pub mod restlessness;

pub use error::{MotionError, MotionResult};
pub use position::{AngleBand, Position, PositionClassifier, PositionConfig};
pub use restlessness::{
    RestlessnessConfig, RestlessnessDecision, RestlessnessState, RestlessnessTracker,
};

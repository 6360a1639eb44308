//! # 🎤 sono-acoustic — Percepção Acústica
//!
//! Classifica a amplitude do microfone em quatro faixas e mantém a
//! **sequência de ronco**: quantas amostras altas chegaram com intervalos
//! curtos entre si. Apenas limiares de amplitude; não há análise espectral.
//!
//! | Nível (ADC) | Classe | Ronco? |
//! |:------------|:-------|:-------|
//! | < 100 | Quiet | não |
//! | < 300 | Moderate | não |
//! | < 600 | Loud | sim |
//! | ≥ 600 | VeryLoud | sim |
//!
//! ## Exemplo
//!
//! ```
//! use sono_acoustic::SoundClassifier;
//!
//! let mut classifier = SoundClassifier::new();
//! assert_eq!(classifier.classify(700, 0).snoring_streak, 1);
//! assert_eq!(classifier.classify(700, 5_000).snoring_streak, 2);
//! ```

pub mod error;
pub mod types;
pub mod sound;

pub use error::{AcousticError, AcousticResult};
pub use types::{SoundConfig, SoundEvent, SoundThresholds};
pub use sound::{SnoringStreak, SoundClassifier};

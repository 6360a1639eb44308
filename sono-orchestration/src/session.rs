//! Estado de rastreamento e identidade da sessão

use sono_core::event::SessionTag;
use sono_core::types::Timestamp;
use sono_motion::Position;

/// Sessão de sono ativa
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub tag: SessionTag,
    pub started_at: Timestamp,
    /// Amostras processadas nesta sessão
    pub samples: u64,
    /// Última posição publicada em `position_change`
    last_reported: Option<Position>,
}

impl Session {
    pub fn new(tag: SessionTag, started_at: Timestamp) -> Self {
        Self {
            tag,
            started_at,
            samples: 0,
            last_reported: None,
        }
    }

    /// Decide se a posição merece um `position_change`
    ///
    /// Publica a primeira classificação da sessão, qualquer troca de postura
    /// e variações de ângulo de pelo menos `threshold_deg` desde a última
    /// publicação. A variação é medida pelo menor arco, então 179° → −179°
    /// conta como 2°.
    pub fn should_report(&mut self, position: &Position, threshold_deg: f32) -> bool {
        let report = match &self.last_reported {
            None => true,
            Some(last) => {
                last.posture != position.posture
                    || angle_delta(last.angle_degrees, position.angle_degrees) >= threshold_deg
            }
        };
        if report {
            self.last_reported = Some(*position);
        }
        report
    }

    pub fn last_reported(&self) -> Option<&Position> {
        self.last_reported.as_ref()
    }
}

/// Distância angular em graus, em [0, 180]
fn angle_delta(from: f32, to: f32) -> f32 {
    ((to - from + 180.0).rem_euclid(360.0) - 180.0).abs()
}

/// Máquina de estados {Idle, Tracking}
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TrackingState {
    #[default]
    Idle,
    Tracking(Session),
}

impl TrackingState {
    /// Inicia (ou substitui) a sessão
    pub fn start(&mut self, tag: SessionTag, now: Timestamp) -> Option<Session> {
        match std::mem::replace(self, TrackingState::Tracking(Session::new(tag, now))) {
            TrackingState::Tracking(previous) => Some(previous),
            TrackingState::Idle => None,
        }
    }

    /// Encerra a sessão, se houver
    pub fn stop(&mut self) -> Option<Session> {
        match std::mem::take(self) {
            TrackingState::Tracking(session) => Some(session),
            TrackingState::Idle => None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, TrackingState::Tracking(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            TrackingState::Tracking(session) => Some(session),
            TrackingState::Idle => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            TrackingState::Tracking(session) => Some(session),
            TrackingState::Idle => None,
        }
    }

    /// Identidade anexada aos eventos enquanto rastreando
    pub fn tag(&self) -> Option<&SessionTag> {
        self.session().map(|s| &s.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sono_core::types::Posture;

    fn tag(session_id: &str) -> SessionTag {
        SessionTag {
            user_id: "u1".into(),
            session_id: session_id.into(),
        }
    }

    fn position(posture: Posture, angle: f32) -> Position {
        Position {
            posture,
            angle_degrees: angle,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_start_overwrites_session() {
        let mut state = TrackingState::default();
        assert!(state.start(tag("s1"), 0).is_none());

        let previous = state.start(tag("s2"), 10).unwrap();
        assert_eq!(previous.tag.session_id, "s1");
        assert_eq!(state.tag().unwrap().session_id, "s2");
    }

    #[test]
    fn test_stop_when_idle() {
        let mut state = TrackingState::Idle;
        assert!(state.stop().is_none());
        assert!(!state.is_tracking());
        assert!(state.tag().is_none());
    }

    #[test]
    fn test_position_reporting() {
        let mut session = Session::new(tag("s1"), 0);

        assert!(session.should_report(&position(Posture::Back, 0.0), 30.0));
        assert!(!session.should_report(&position(Posture::Back, 20.0), 30.0));
        assert!(session.should_report(&position(Posture::Side, 31.0), 30.0));
        assert!(!session.should_report(&position(Posture::Side, 60.0), 30.0));
        assert!(session.should_report(&position(Posture::Side, 61.0), 30.0));
        assert_eq!(session.last_reported().unwrap().angle_degrees, 61.0);
    }

    #[test]
    fn test_angle_delta_wraps() {
        assert!((angle_delta(179.0, -179.0) - 2.0).abs() < 1e-4);
        assert!((angle_delta(-179.0, 179.0) - 2.0).abs() < 1e-4);
        assert!((angle_delta(-90.0, 90.0) - 180.0).abs() < 1e-4);
        assert!((angle_delta(10.0, 40.0) - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_stomach_jitter_across_wrap_not_reported() {
        let mut session = Session::new(tag("s1"), 0);

        assert!(session.should_report(&position(Posture::Stomach, 179.0), 30.0));
        assert!(!session.should_report(&position(Posture::Stomach, -179.0), 30.0));
        assert!(!session.should_report(&position(Posture::Stomach, 179.0), 30.0));
        assert!(session.should_report(&position(Posture::Stomach, -150.0), 30.0));
    }
}

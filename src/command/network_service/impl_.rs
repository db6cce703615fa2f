use super::responses::SignalQuality;
use super::types::*;

impl NetworkRegistrationStat {
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered | Self::RegisteredRoaming)
    }
}

impl SignalQuality {
    pub fn is_detectable(&self) -> bool {
        self.dbm().is_some()
    }
}

#![allow(dead_code)]

use mock_interview::{
    AccessDenied, DeviceGrant, MediaCapture, Notice, PermissionKind, ResumeCandidate, Route,
    SessionHost,
};

/// Everything the core asked of its host, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Navigate(Route),
    Notify(Notice),
}

#[derive(Debug, Default)]
pub struct NavigatorSpy {
    pub calls: Vec<HostCall>,
}

impl NavigatorSpy {
    pub fn routes(&self) -> Vec<Route> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Navigate(route) => Some(*route),
                HostCall::Notify(_) => None,
            })
            .collect()
    }

    pub fn notice_titles(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Notify(notice) => Some(notice.title.clone()),
                HostCall::Navigate(_) => None,
            })
            .collect()
    }
}

impl SessionHost for NavigatorSpy {
    fn navigate(&mut self, route: Route) {
        self.calls.push(HostCall::Navigate(route));
    }

    fn notify(&mut self, notice: Notice) {
        self.calls.push(HostCall::Notify(notice));
    }
}

/// Grants every kind listed in `allowed`, denies the rest.
pub struct ScriptedCapture {
    pub allowed: Vec<PermissionKind>,
    pub requests: Vec<PermissionKind>,
}

impl ScriptedCapture {
    pub fn allowing(allowed: &[PermissionKind]) -> Self {
        Self {
            allowed: allowed.to_vec(),
            requests: Vec::new(),
        }
    }
}

impl MediaCapture for ScriptedCapture {
    fn request_access(&mut self, kind: PermissionKind) -> Result<DeviceGrant, AccessDenied> {
        self.requests.push(kind);
        if self.allowed.contains(&kind) {
            Ok(DeviceGrant::new(kind))
        } else {
            Err(AccessDenied {
                kind,
                reason: "NotAllowedError".to_string(),
            })
        }
    }
}

pub fn two_megabyte_pdf() -> ResumeCandidate {
    ResumeCandidate::new("resume.pdf", 2 * 1024 * 1024, "application/pdf")
}

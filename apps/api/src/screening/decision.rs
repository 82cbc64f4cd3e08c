//! Decision nodes — the three terminal outcomes of a screening run.

use serde::{Deserialize, Serialize};

use crate::screening::state::StateUpdate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionNode {
    ScheduleHrInterview,
    EscalateToRecruiter,
    RejectApplication,
}

impl DecisionNode {
    #[cfg(test)]
    pub const ALL: [DecisionNode; 3] = [
        DecisionNode::ScheduleHrInterview,
        DecisionNode::EscalateToRecruiter,
        DecisionNode::RejectApplication,
    ];

    /// Workflow node name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ScheduleHrInterview => "schedule_hr_interview",
            Self::EscalateToRecruiter => "escalate_to_recruiter",
            Self::RejectApplication => "reject_application",
        }
    }

    pub fn response(self) -> &'static str {
        match self {
            Self::ScheduleHrInterview => "Candidate has been shortlisted for an HR interview.",
            Self::EscalateToRecruiter => {
                "Candidate has senior-level experience but doesn't match job skills."
            }
            Self::RejectApplication => "Candidate doesn't meet JD and has been rejected.",
        }
    }

    /// Runs the node. Pure: the update depends only on which node was selected.
    pub fn run(self) -> StateUpdate {
        StateUpdate::Response(self.response().to_string())
    }
}

use serde::{Deserialize, Serialize};

use crate::models::{inquiry::Inquiry, report::Report, site::Site, worker::Worker};

pub mod allocation;
pub mod customer;
pub mod payroll;
pub mod project;

#[derive(Debug, Deserialize, Serialize)]
pub struct DerivedViews {
    pub projects: Vec<project::ProjectSummary>,
    pub payroll: Vec<payroll::PayrollEntry>,
    pub customers: Vec<customer::Customer>,
}

/// The read model in one call: four collection snapshots in, three
/// derived views out. Pure and synchronous; safe to recompute on every
/// request, and never persisted.
pub fn derive(
    workers: &[Worker],
    reports: &[Report],
    sites: &[Site],
    inquiries: &[Inquiry],
) -> DerivedViews {
    DerivedViews {
        projects: project::aggregate(sites, reports, workers),
        payroll: payroll::aggregate(workers, reports),
        customers: customer::aggregate(reports, inquiries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        inquiry::{InquiryChannelKind, InquiryKind, InquiryStatusKind},
        report::{ReportStatusKind, WorkerCostDetail},
        site::SiteStatusKind,
        worker::{WageKind, WorkerKind, WorkerStatusKind},
    };
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn one_call_yields_all_three_views() {
        let worker_id = ObjectId::new();
        let workers = vec![Worker {
            _id: Some(worker_id),
            name: "Bashir".to_string(),
            role: "Cleaner".to_string(),
            status: WorkerStatusKind::Active,
            phone: None,
            join_date: "2026-01-01".to_string(),
            identity_number: None,
            kind: Some(WorkerKind::External),
            wage: Some(WageKind::Daily),
            base_rate: Some(150.0),
        }];
        let sites = vec![Site {
            _id: Some(ObjectId::new()),
            name: "Villa A".to_string(),
            address: "Al Wasl Road".to_string(),
            client_name: "Mona".to_string(),
            status: SiteStatusKind::Active,
            assigned_workers: 1,
        }];
        let reports = vec![Report {
            _id: Some(ObjectId::new()),
            date: "2026-08-01".to_string(),
            site_location: "Villa A".to_string(),
            client_name: "Mona".to_string(),
            client_phone: Some("0501234567".to_string()),
            car_number: None,
            start_time: None,
            end_time: None,
            work_description: "Routine cleaning".to_string(),
            worker_details: vec![WorkerCostDetail {
                worker_id,
                worker_name: "Bashir".to_string(),
                kind: WorkerKind::External,
                cost: 150.0,
            }],
            consumed_materials: None,
            cash_expenses: None,
            cost: Some("500".to_string()),
            payment_method: None,
            image_before: None,
            image_after: None,
            notes: None,
            status: ReportStatusKind::Approved,
            supervisor_name: "Salem".to_string(),
            supervisor_id: None,
        }];
        let inquiries = vec![Inquiry {
            _id: Some(ObjectId::new()),
            customer_name: "Huda".to_string(),
            phone: Some("0559876543".to_string()),
            channel: InquiryChannelKind::Call,
            kind: InquiryKind::Price,
            notes: "Asked for a quote".to_string(),
            date: "2026-08-02".to_string(),
            status: InquiryStatusKind::New,
        }];

        let views = derive(&workers, &reports, &sites, &inquiries);

        assert_eq!(views.projects.len(), 1);
        assert_eq!(views.projects[0].revenue, 500.0);
        assert_eq!(views.projects[0].expenses.direct_labor, 150.0);
        assert_eq!(views.payroll.len(), 1);
        assert_eq!(views.payroll[0].total_due, 150.0);
        assert_eq!(views.customers.len(), 2);
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::allocation::{self, ReportAllocation};
use crate::models::{
    report::Report,
    site::{Site, SiteStatusKind},
    worker::Worker,
};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatusKind {
    Active,
    Completed,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProjectExpenses {
    pub direct_labor: f64,
    pub allocated_labor: f64,
    pub supervisor_cost: f64,
    pub materials: f64,
    pub cash_expenses: f64,
    pub total: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProjectSummary {
    pub site_name: String,
    pub client_name: String,
    pub revenue: f64,
    pub expenses: ProjectExpenses,
    pub net_profit: f64,
    pub status: ProjectStatusKind,
    pub last_activity: Option<String>,
}

impl ProjectSummary {
    fn seed(site_name: String, client_name: String, status: ProjectStatusKind) -> ProjectSummary {
        ProjectSummary {
            site_name,
            client_name,
            revenue: 0.0,
            expenses: ProjectExpenses::default(),
            net_profit: 0.0,
            status,
            last_activity: None,
        }
    }
    fn fold(&mut self, allocation: &ReportAllocation, date: &str) {
        self.revenue += allocation.revenue;
        self.expenses.direct_labor += allocation.direct_labor;
        self.expenses.allocated_labor += allocation.allocated_labor;
        self.expenses.supervisor_cost += allocation.supervisor_cost;
        self.expenses.materials += allocation.materials;
        self.expenses.cash_expenses += allocation.cash_expenses;
        self.expenses.total += allocation.total_expense;
        self.net_profit = self.revenue - self.expenses.total;

        // Lexical max works as long as dates stay ISO formatted.
        match &self.last_activity {
            Some(last_activity) if date <= last_activity.as_str() => {}
            _ => self.last_activity = Some(date.to_string()),
        }
    }
}

/// Group reports by site location into per-project financials. Sites seed
/// zero-valued entries; a report whose location has no site yet still
/// creates an ad-hoc entry, since the two snapshots may be out of step.
/// Output order follows insertion and is not guaranteed.
pub fn aggregate(sites: &[Site], reports: &[Report], workers: &[Worker]) -> Vec<ProjectSummary> {
    let roster = allocation::roster_index(workers);
    let mut summaries: Vec<ProjectSummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for site in sites {
        let status = match site.status {
            SiteStatusKind::Active => ProjectStatusKind::Active,
            _ => ProjectStatusKind::Completed,
        };
        let summary =
            ProjectSummary::seed(site.name.clone(), site.client_name.clone(), status);
        match index.get(&site.name) {
            // A later duplicate site name replaces the earlier seed.
            Some(&at) => summaries[at] = summary,
            None => {
                index.insert(site.name.clone(), summaries.len());
                summaries.push(summary);
            }
        }
    }

    for report in reports {
        let at = match index.get(&report.site_location) {
            Some(&at) => at,
            None => {
                index.insert(report.site_location.clone(), summaries.len());
                summaries.push(ProjectSummary::seed(
                    report.site_location.clone(),
                    report.client_name.clone(),
                    ProjectStatusKind::Active,
                ));
                summaries.len() - 1
            }
        };

        let allocation = allocation::allocate(report, &roster);
        summaries[at].fold(&allocation, &report.date);
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        report::{ReportStatusKind, WorkerCostDetail},
        worker::{WageKind, WorkerKind, WorkerStatusKind},
    };
    use mongodb::bson::oid::ObjectId;

    fn company_worker(_id: ObjectId, base_rate: f64) -> Worker {
        Worker {
            _id: Some(_id),
            name: "Ahmed".to_string(),
            role: "Cleaner".to_string(),
            status: WorkerStatusKind::Active,
            phone: None,
            join_date: "2026-01-01".to_string(),
            identity_number: None,
            kind: Some(WorkerKind::Company),
            wage: Some(WageKind::Monthly),
            base_rate: Some(base_rate),
        }
    }

    fn site(name: &str, status: SiteStatusKind) -> Site {
        Site {
            _id: Some(ObjectId::new()),
            name: name.to_string(),
            address: "Al Wasl Road".to_string(),
            client_name: "Mona".to_string(),
            status,
            assigned_workers: 2,
        }
    }

    fn report(location: &str, date: &str, cost: &str, details: Vec<WorkerCostDetail>) -> Report {
        Report {
            _id: Some(ObjectId::new()),
            date: date.to_string(),
            site_location: location.to_string(),
            client_name: "Mona".to_string(),
            client_phone: None,
            car_number: None,
            start_time: None,
            end_time: None,
            work_description: "Routine cleaning".to_string(),
            worker_details: details,
            consumed_materials: None,
            cash_expenses: None,
            cost: Some(cost.to_string()),
            payment_method: None,
            image_before: None,
            image_after: None,
            notes: None,
            status: ReportStatusKind::Approved,
            supervisor_name: "Salem".to_string(),
            supervisor_id: None,
        }
    }

    fn detail(worker_id: ObjectId, kind: WorkerKind, cost: f64) -> WorkerCostDetail {
        WorkerCostDetail {
            worker_id,
            worker_name: "Ahmed".to_string(),
            kind,
            cost,
        }
    }

    #[test]
    fn salary_allocation_across_two_reports() {
        let worker_id = ObjectId::new();
        let workers = vec![company_worker(worker_id, 3000.0)];
        let reports = vec![
            report(
                "Villa A",
                "2026-08-01",
                "500",
                vec![detail(worker_id, WorkerKind::Company, 0.0)],
            ),
            report(
                "Villa A",
                "2026-08-02",
                "500",
                vec![detail(worker_id, WorkerKind::Company, 0.0)],
            ),
        ];

        let summaries = aggregate(&[], &reports, &workers);
        assert_eq!(summaries.len(), 1);
        let villa = &summaries[0];
        assert_eq!(villa.revenue, 1000.0);
        assert_eq!(villa.expenses.allocated_labor, 200.0);
        assert_eq!(villa.net_profit, 800.0);
        assert_eq!(villa.last_activity.as_deref(), Some("2026-08-02"));
    }

    #[test]
    fn report_order_does_not_change_totals() {
        let worker_id = ObjectId::new();
        let workers = vec![company_worker(worker_id, 3000.0)];
        let mut reports = vec![
            report("Villa A", "2026-08-01", "500", vec![detail(worker_id, WorkerKind::Company, 0.0)]),
            report("Villa B", "2026-08-02", "700", vec![detail(ObjectId::new(), WorkerKind::External, 150.0)]),
            report("Villa A", "2026-08-03", "250", Vec::new()),
        ];

        let forward = aggregate(&[], &reports, &workers);
        reports.reverse();
        let backward = aggregate(&[], &reports, &workers);

        let mut forward: Vec<_> = forward
            .into_iter()
            .map(|summary| (summary.site_name.clone(), summary))
            .collect();
        let mut backward: Vec<_> = backward
            .into_iter()
            .map(|summary| (summary.site_name.clone(), summary))
            .collect();
        forward.sort_by(|a, b| a.0.cmp(&b.0));
        backward.sort_by(|a, b| a.0.cmp(&b.0));

        for ((_, a), (_, b)) in forward.iter().zip(backward.iter()) {
            assert_eq!(a.site_name, b.site_name);
            assert_eq!(a.revenue, b.revenue);
            assert_eq!(a.expenses.total, b.expenses.total);
            assert_eq!(a.net_profit, b.net_profit);
            assert_eq!(a.last_activity, b.last_activity);
        }
    }

    #[test]
    fn project_profit_matches_per_report_profit() {
        let worker_id = ObjectId::new();
        let workers = vec![company_worker(worker_id, 3000.0)];
        let reports = vec![
            report("Villa A", "2026-08-01", "500", vec![detail(worker_id, WorkerKind::Company, 0.0)]),
            report("Villa B", "2026-08-02", "700", vec![detail(ObjectId::new(), WorkerKind::External, 150.0)]),
            report("Villa A", "2026-08-03", "bad-input", Vec::new()),
        ];

        let roster = allocation::roster_index(&workers);
        let per_report: f64 = reports
            .iter()
            .map(|report| allocation::allocate(report, &roster).net_profit)
            .sum();
        let per_project: f64 = aggregate(&[], &reports, &workers)
            .iter()
            .map(|summary| summary.net_profit)
            .sum();
        assert_eq!(per_project, per_report);
    }

    #[test]
    fn sites_seed_zero_valued_projects() {
        let sites = vec![
            site("Villa A", SiteStatusKind::Active),
            site("Tower B", SiteStatusKind::Completed),
        ];
        let summaries = aggregate(&sites, &[], &[]);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].status, ProjectStatusKind::Active);
        assert_eq!(summaries[1].status, ProjectStatusKind::Completed);
        assert_eq!(summaries[0].revenue, 0.0);
        assert_eq!(summaries[0].last_activity, None);
    }

    #[test]
    fn unknown_location_creates_ad_hoc_project() {
        let summaries = aggregate(&[], &[report("Pop-up site", "2026-08-01", "300", Vec::new())], &[]);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].site_name, "Pop-up site");
        assert_eq!(summaries[0].status, ProjectStatusKind::Active);
        assert_eq!(summaries[0].revenue, 300.0);
    }
}

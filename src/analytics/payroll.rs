use serde::{Deserialize, Serialize};

use crate::models::{
    report::Report,
    worker::{Worker, WorkerKind},
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PayrollEntry {
    pub worker_id: String,
    pub worker_name: String,
    pub role: String,
    pub kind: WorkerKind,
    pub base_salary: f64,
    pub total_daily_wages: f64,
    pub days_worked: u32,
    pub total_due: f64,
}

/// One payroll statement per worker. External workers earn the wage
/// recorded on each report that lists them, one day per report. Company
/// workers (or workers with no kind on file) are owed their flat salary;
/// their day count is informational only.
pub fn aggregate(workers: &[Worker], reports: &[Report]) -> Vec<PayrollEntry> {
    let mut payroll: Vec<PayrollEntry> = Vec::new();

    for worker in workers {
        let kind = worker.kind.clone().unwrap_or(WorkerKind::Company);
        let mut entry = PayrollEntry {
            worker_id: worker._id.map(|_id| _id.to_string()).unwrap_or_default(),
            worker_name: worker.name.clone(),
            role: worker.role.clone(),
            kind: kind.clone(),
            base_salary: worker.base_rate.unwrap_or(0.0),
            total_daily_wages: 0.0,
            days_worked: 0,
            total_due: 0.0,
        };

        match kind {
            WorkerKind::External => {
                for report in reports {
                    if let Some(detail) = report
                        .worker_details
                        .iter()
                        .find(|detail| Some(detail.worker_id) == worker._id)
                    {
                        entry.total_daily_wages += detail.cost;
                        entry.days_worked += 1;
                    }
                }
                entry.total_due = entry.total_daily_wages;
            }
            WorkerKind::Company => {
                entry.total_due = entry.base_salary;
                entry.days_worked = reports
                    .iter()
                    .filter(|report| {
                        report
                            .worker_details
                            .iter()
                            .any(|detail| Some(detail.worker_id) == worker._id)
                    })
                    .count() as u32;
            }
        }

        payroll.push(entry);
    }

    payroll
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::project;
    use crate::models::{
        report::{ReportStatusKind, WorkerCostDetail},
        worker::{WageKind, WorkerStatusKind},
    };
    use mongodb::bson::oid::ObjectId;

    fn worker(_id: ObjectId, kind: Option<WorkerKind>, base_rate: Option<f64>) -> Worker {
        Worker {
            _id: Some(_id),
            name: "Bashir".to_string(),
            role: "Cleaner".to_string(),
            status: WorkerStatusKind::Active,
            phone: None,
            join_date: "2026-01-01".to_string(),
            identity_number: None,
            kind,
            wage: Some(WageKind::Daily),
            base_rate,
        }
    }

    fn report(location: &str, details: Vec<WorkerCostDetail>) -> Report {
        Report {
            _id: Some(ObjectId::new()),
            date: "2026-08-01".to_string(),
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
            cost: Some("500".to_string()),
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
            worker_name: "Bashir".to_string(),
            kind,
            cost,
        }
    }

    #[test]
    fn external_worker_earns_per_report() {
        let worker_id = ObjectId::new();
        let workers = vec![worker(worker_id, Some(WorkerKind::External), Some(150.0))];
        let reports = vec![
            report("Villa A", vec![detail(worker_id, WorkerKind::External, 150.0)]),
            report("Villa B", vec![detail(worker_id, WorkerKind::External, 150.0)]),
            report("Villa A", vec![detail(worker_id, WorkerKind::External, 150.0)]),
        ];

        let payroll = aggregate(&workers, &reports);
        assert_eq!(payroll.len(), 1);
        assert_eq!(payroll[0].days_worked, 3);
        assert_eq!(payroll[0].total_daily_wages, 450.0);
        assert_eq!(payroll[0].total_due, 450.0);
    }

    #[test]
    fn company_worker_gets_flat_salary() {
        let worker_id = ObjectId::new();
        let workers = vec![worker(worker_id, Some(WorkerKind::Company), Some(3000.0))];
        let reports = vec![report(
            "Villa A",
            vec![detail(worker_id, WorkerKind::Company, 0.0)],
        )];

        let payroll = aggregate(&workers, &reports);
        assert_eq!(payroll[0].total_due, 3000.0);
        assert_eq!(payroll[0].days_worked, 1);
        assert_eq!(payroll[0].total_daily_wages, 0.0);
    }

    #[test]
    fn unset_kind_reads_as_company() {
        let worker_id = ObjectId::new();
        let workers = vec![worker(worker_id, None, Some(2500.0))];

        let payroll = aggregate(&workers, &[]);
        assert_eq!(payroll[0].kind, WorkerKind::Company);
        assert_eq!(payroll[0].total_due, 2500.0);
    }

    #[test]
    fn missing_base_rate_owes_zero() {
        let workers = vec![worker(ObjectId::new(), Some(WorkerKind::Company), None)];

        let payroll = aggregate(&workers, &[]);
        assert_eq!(payroll[0].total_due, 0.0);
    }

    // External wages grouped by worker must equal the same wages grouped
    // by site: both sides read the identical cost details.
    #[test]
    fn external_dues_match_project_direct_labor() {
        let first = ObjectId::new();
        let second = ObjectId::new();
        let workers = vec![
            worker(first, Some(WorkerKind::External), Some(150.0)),
            worker(second, Some(WorkerKind::External), Some(200.0)),
        ];
        let reports = vec![
            report("Villa A", vec![detail(first, WorkerKind::External, 150.0)]),
            report(
                "Villa B",
                vec![
                    detail(first, WorkerKind::External, 150.0),
                    detail(second, WorkerKind::External, 200.0),
                ],
            ),
        ];

        let external_due: f64 = aggregate(&workers, &reports)
            .iter()
            .filter(|entry| entry.kind == WorkerKind::External)
            .map(|entry| entry.total_due)
            .sum();
        let direct_labor: f64 = project::aggregate(&[], &reports, &workers)
            .iter()
            .map(|summary| summary.expenses.direct_labor)
            .sum();
        assert_eq!(external_due, direct_labor);
    }
}

use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;

use crate::models::{
    report::Report,
    worker::{Worker, WorkerKind},
};

// Fixed monthly divisor for salary pro-ration, not a calendar-day count.
pub const MONTHLY_DIVISOR: f64 = 30.0;

/// Lenient amount parsing. Reports are often saved half-filled, so a
/// missing or unparsable amount counts as zero instead of failing; the
/// dashboards downstream must always render a number.
pub fn parse_amount(value: Option<&str>) -> f64 {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Index the roster by id once per engine call, so per-report lookups do
/// not rescan the worker list.
pub fn roster_index(workers: &[Worker]) -> HashMap<ObjectId, &Worker> {
    let mut index: HashMap<ObjectId, &Worker> = HashMap::new();
    for worker in workers {
        if let Some(_id) = worker._id {
            index.insert(_id, worker);
        }
    }
    index
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportAllocation {
    pub revenue: f64,
    pub direct_labor: f64,
    pub allocated_labor: f64,
    pub supervisor_cost: f64,
    pub materials: f64,
    pub cash_expenses: f64,
    pub total_expense: f64,
    pub net_profit: f64,
}

/// Split one report's cost inputs into direct cash against external
/// workers, pro-rated salary shares for company workers and the
/// supervisor, frozen material costs, and loose cash expenses.
pub fn allocate(report: &Report, roster: &HashMap<ObjectId, &Worker>) -> ReportAllocation {
    let revenue = parse_amount(report.cost.as_deref());

    let mut direct_labor: f64 = 0.0;
    let mut allocated_labor: f64 = 0.0;
    for detail in report.worker_details.iter() {
        match detail.kind {
            WorkerKind::External => direct_labor += detail.cost,
            WorkerKind::Company => {
                // A worker removed from the roster since the report was
                // written contributes nothing.
                if let Some(base_rate) =
                    roster.get(&detail.worker_id).and_then(|worker| worker.base_rate)
                {
                    allocated_labor += base_rate / MONTHLY_DIVISOR;
                }
            }
        }
    }

    let mut supervisor_cost: f64 = 0.0;
    if let Some(supervisor_id) = &report.supervisor_id {
        if let Some(base_rate) = roster.get(supervisor_id).and_then(|worker| worker.base_rate) {
            supervisor_cost = base_rate / MONTHLY_DIVISOR;
        }
    }

    // Material costs were frozen at report-write time; current inventory
    // prices are irrelevant here.
    let materials: f64 = report
        .consumed_materials
        .as_ref()
        .map(|materials| materials.iter().map(|material| material.cost_at_time).sum())
        .unwrap_or(0.0);
    let cash_expenses: f64 = report
        .cash_expenses
        .as_ref()
        .map(|expenses| expenses.iter().map(|expense| expense.amount).sum())
        .unwrap_or(0.0);

    let total_expense =
        direct_labor + allocated_labor + supervisor_cost + materials + cash_expenses;

    ReportAllocation {
        revenue,
        direct_labor,
        allocated_labor,
        supervisor_cost,
        materials,
        cash_expenses,
        total_expense,
        net_profit: revenue - total_expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        report::{CashExpense, ConsumedMaterial, ReportStatusKind, WorkerCostDetail},
        worker::{WageKind, WorkerStatusKind},
    };

    fn worker(_id: ObjectId, kind: WorkerKind, base_rate: Option<f64>) -> Worker {
        Worker {
            _id: Some(_id),
            name: "Ahmed".to_string(),
            role: "Cleaner".to_string(),
            status: WorkerStatusKind::Active,
            phone: None,
            join_date: "2026-01-01".to_string(),
            identity_number: None,
            kind: Some(kind),
            wage: Some(WageKind::Monthly),
            base_rate,
        }
    }

    fn report(cost: Option<&str>, details: Vec<WorkerCostDetail>) -> Report {
        Report {
            _id: Some(ObjectId::new()),
            date: "2026-08-01".to_string(),
            site_location: "Villa A".to_string(),
            client_name: "Mona".to_string(),
            client_phone: None,
            car_number: None,
            start_time: None,
            end_time: None,
            work_description: "Full villa cleaning".to_string(),
            worker_details: details,
            consumed_materials: None,
            cash_expenses: None,
            cost: cost.map(String::from),
            payment_method: None,
            image_before: None,
            image_after: None,
            notes: None,
            status: ReportStatusKind::Approved,
            supervisor_name: "Salem".to_string(),
            supervisor_id: None,
        }
    }

    #[test]
    fn parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount(None), 0.0);
        assert_eq!(parse_amount(Some("")), 0.0);
        assert_eq!(parse_amount(Some("abc")), 0.0);
        assert_eq!(parse_amount(Some(" 150.5 ")), 150.5);
    }

    #[test]
    fn components_add_up() {
        let company_id = ObjectId::new();
        let supervisor_id = ObjectId::new();
        let workers = vec![
            worker(company_id, WorkerKind::Company, Some(3000.0)),
            worker(supervisor_id, WorkerKind::Company, Some(6000.0)),
        ];
        let roster = roster_index(&workers);

        let mut report = report(
            Some("1000"),
            vec![
                WorkerCostDetail {
                    worker_id: company_id,
                    worker_name: "Ahmed".to_string(),
                    kind: WorkerKind::Company,
                    cost: 0.0,
                },
                WorkerCostDetail {
                    worker_id: ObjectId::new(),
                    worker_name: "Bashir".to_string(),
                    kind: WorkerKind::External,
                    cost: 150.0,
                },
            ],
        );
        report.supervisor_id = Some(supervisor_id);
        report.consumed_materials = Some(vec![ConsumedMaterial {
            item_id: ObjectId::new(),
            item_name: "Floor soap".to_string(),
            quantity: 2.0,
            unit: "bottle".to_string(),
            cost_at_time: 40.0,
        }]);
        report.cash_expenses = Some(vec![CashExpense {
            description: "Fuel".to_string(),
            amount: 30.0,
        }]);

        let allocation = allocate(&report, &roster);
        assert_eq!(allocation.direct_labor, 150.0);
        assert_eq!(allocation.allocated_labor, 100.0);
        assert_eq!(allocation.supervisor_cost, 200.0);
        assert_eq!(allocation.materials, 40.0);
        assert_eq!(allocation.cash_expenses, 30.0);
        assert_eq!(
            allocation.total_expense,
            allocation.direct_labor
                + allocation.allocated_labor
                + allocation.supervisor_cost
                + allocation.materials
                + allocation.cash_expenses
        );
        assert_eq!(allocation.net_profit, allocation.revenue - allocation.total_expense);
    }

    #[test]
    fn missing_cost_degrades_to_zero_revenue() {
        let roster = roster_index(&[]);
        let allocation = allocate(&report(None, Vec::new()), &roster);
        assert_eq!(allocation.revenue, 0.0);
        assert_eq!(allocation.net_profit, 0.0);
    }

    #[test]
    fn company_worker_missing_from_roster_contributes_nothing() {
        let roster = roster_index(&[]);
        let report = report(
            Some("500"),
            vec![WorkerCostDetail {
                worker_id: ObjectId::new(),
                worker_name: "Gone".to_string(),
                kind: WorkerKind::Company,
                cost: 0.0,
            }],
        );
        let allocation = allocate(&report, &roster);
        assert_eq!(allocation.allocated_labor, 0.0);
        assert_eq!(allocation.net_profit, 500.0);
    }
}

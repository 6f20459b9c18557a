use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::allocation::parse_amount;
use crate::models::{inquiry::Inquiry, report::Report};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CustomerKind {
    Active,
    Lead,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub kind: CustomerKind,
    pub last_interaction: String,
    pub total_visits: u32,
    pub total_spent: f64,
}

// Contacts are keyed by phone when one is on file, by name otherwise.
// Two customers sharing an unset phone and an identical name collapse
// into one record; that ambiguity is accepted, not silently repaired.
fn contact_key(phone: Option<&str>, name: &str) -> String {
    match phone {
        Some(phone) if !phone.is_empty() => phone.to_string(),
        _ => name.to_string(),
    }
}

/// Merge reports and inquiries into one customer book. Reports are folded
/// first and always win: an inquiry only introduces a contact the reports
/// have never seen, as a lead. Output is sorted by most recent
/// interaction (lexical ISO-date sort).
pub fn aggregate(reports: &[Report], inquiries: &[Inquiry]) -> Vec<Customer> {
    let mut customers: Vec<Customer> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for report in reports {
        let key = contact_key(report.client_phone.as_deref(), &report.client_name);
        match index.get(&key) {
            Some(&at) => {
                let customer = &mut customers[at];
                customer.total_visits += 1;
                customer.total_spent += parse_amount(report.cost.as_deref());
                if report.date > customer.last_interaction {
                    customer.last_interaction = report.date.clone();
                }
                customer.location = Some(report.site_location.clone());
                customer.kind = CustomerKind::Active;
            }
            None => {
                index.insert(key.clone(), customers.len());
                customers.push(Customer {
                    id: format!("C-{key}"),
                    name: report.client_name.clone(),
                    phone: report.client_phone.clone(),
                    location: Some(report.site_location.clone()),
                    kind: CustomerKind::Active,
                    last_interaction: report.date.clone(),
                    total_visits: 1,
                    total_spent: parse_amount(report.cost.as_deref()),
                });
            }
        }
    }

    for inquiry in inquiries {
        let key = contact_key(inquiry.phone.as_deref(), &inquiry.customer_name);
        if !index.contains_key(&key) {
            index.insert(key.clone(), customers.len());
            customers.push(Customer {
                id: format!(
                    "L-{}",
                    inquiry._id.map(|_id| _id.to_string()).unwrap_or(key)
                ),
                name: inquiry.customer_name.clone(),
                phone: inquiry.phone.clone(),
                location: None,
                kind: CustomerKind::Lead,
                last_interaction: inquiry.date.clone(),
                total_visits: 0,
                total_spent: 0.0,
            });
        }
    }

    customers.sort_by(|a, b| b.last_interaction.cmp(&a.last_interaction));
    customers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        inquiry::{InquiryChannelKind, InquiryKind, InquiryStatusKind},
        report::ReportStatusKind,
    };
    use mongodb::bson::oid::ObjectId;

    fn report(name: &str, phone: Option<&str>, date: &str, cost: Option<&str>) -> Report {
        Report {
            _id: Some(ObjectId::new()),
            date: date.to_string(),
            site_location: "Villa A".to_string(),
            client_name: name.to_string(),
            client_phone: phone.map(String::from),
            car_number: None,
            start_time: None,
            end_time: None,
            work_description: "Routine cleaning".to_string(),
            worker_details: Vec::new(),
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

    fn inquiry(name: &str, phone: Option<&str>, date: &str) -> Inquiry {
        Inquiry {
            _id: Some(ObjectId::new()),
            customer_name: name.to_string(),
            phone: phone.map(String::from),
            channel: InquiryChannelKind::WhatsApp,
            kind: InquiryKind::Price,
            notes: "Asked for a quote".to_string(),
            date: date.to_string(),
            status: InquiryStatusKind::New,
        }
    }

    #[test]
    fn repeat_visits_fold_into_one_record() {
        let reports = vec![
            report("Mona", Some("0501234567"), "2026-08-01", Some("500")),
            report("Mona", Some("0501234567"), "2026-08-03", Some("700")),
        ];

        let customers = aggregate(&reports, &[]);
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].total_visits, 2);
        assert_eq!(customers[0].total_spent, 1200.0);
        assert_eq!(customers[0].last_interaction, "2026-08-03");
        assert_eq!(customers[0].kind, CustomerKind::Active);
    }

    #[test]
    fn later_inquiry_never_downgrades_an_active_customer() {
        let reports = vec![report("Mona", Some("0501234567"), "2026-08-01", Some("500"))];
        let inquiries = vec![inquiry("Mona", Some("0501234567"), "2026-08-05")];

        let customers = aggregate(&reports, &inquiries);
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].kind, CustomerKind::Active);
        // The inquiry is ignored wholesale, its later date included.
        assert_eq!(customers[0].last_interaction, "2026-08-01");
    }

    #[test]
    fn unseen_inquiry_becomes_a_lead() {
        let inquiries = vec![inquiry("Huda", Some("0559876543"), "2026-08-02")];

        let customers = aggregate(&[], &inquiries);
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].kind, CustomerKind::Lead);
        assert_eq!(customers[0].total_visits, 0);
        assert_eq!(customers[0].total_spent, 0.0);
        assert_eq!(customers[0].location, None);
    }

    #[test]
    fn missing_phone_falls_back_to_name() {
        let reports = vec![
            report("Mona", None, "2026-08-01", Some("500")),
            report("Mona", Some(""), "2026-08-02", Some("300")),
        ];

        let customers = aggregate(&reports, &[]);
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].total_visits, 2);
    }

    #[test]
    fn sorted_by_most_recent_interaction() {
        let reports = vec![
            report("Mona", Some("0501111111"), "2026-08-01", Some("500")),
            report("Huda", Some("0502222222"), "2026-08-04", Some("200")),
        ];
        let inquiries = vec![inquiry("Noor", Some("0503333333"), "2026-08-02")];

        let customers = aggregate(&reports, &inquiries);
        let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Huda", "Noor", "Mona"]);
    }

    #[test]
    fn unparsable_cost_counts_as_zero_spend() {
        let reports = vec![report("Mona", Some("0501234567"), "2026-08-01", None)];

        let customers = aggregate(&reports, &[]);
        assert_eq!(customers[0].total_spent, 0.0);
    }
}

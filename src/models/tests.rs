#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use super::*;
use crate::money::Cents;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ── Validation helpers ────────────────────────────────────────

#[test]
fn test_plausible_email() {
    assert!(is_plausible_email("ada@example.com"));
    assert!(is_plausible_email("  first.last+tag@sub.example.co  "));
    assert!(!is_plausible_email("ada@example"));
    assert!(!is_plausible_email("ada example.com"));
    assert!(!is_plausible_email("ada@@example.com"));
    assert!(!is_plausible_email(""));
}

#[test]
fn test_require_lists_missing_fields() {
    let err = require(&[("name", ""), ("company", "Acme"), ("email", "  ")]).unwrap_err();
    assert_eq!(err.to_string(), "Missing required fields: name, email");
    assert!(require(&[("name", "Ada")]).is_ok());
}

// ── Client ────────────────────────────────────────────────────

#[test]
fn test_client_new_trims() {
    let client = Client::new(" Ada ".into(), "Acme ".into(), " ada@acme.io".into());
    assert!(client.id.is_none());
    assert_eq!(client.name, "Ada");
    assert_eq!(client.company, "Acme");
    assert_eq!(client.email, "ada@acme.io");
    assert!(!client.created_at.is_empty());
}

#[test]
fn test_client_validate() {
    assert!(Client::new("Ada".into(), "Acme".into(), "ada@acme.io".into())
        .validate()
        .is_ok());
    assert!(Client::new("Ada".into(), "".into(), "ada@acme.io".into())
        .validate()
        .is_err());
    assert!(Client::new("Ada".into(), "Acme".into(), "nope".into())
        .validate()
        .is_err());
}

#[test]
fn test_client_display() {
    let client = Client::new("Ada".into(), "Acme".into(), "ada@acme.io".into());
    assert_eq!(format!("{client}"), "Ada (Acme)");
}

// ── Project ───────────────────────────────────────────────────

#[test]
fn test_project_status_roundtrip() {
    for s in ProjectStatus::all() {
        assert_eq!(ProjectStatus::parse(s.as_str()), Some(*s));
    }
    assert_eq!(ProjectStatus::parse("Canceled"), Some(ProjectStatus::Cancelled));
    assert_eq!(ProjectStatus::parse("archived"), None);
}

#[test]
fn test_project_for_forecast() {
    let mut project = Project::new(1, "Site rebuild".into(), Cents::new(120_000));
    project.start_date = Some(date("2024-01-01"));
    project.end_date = Some(date("2024-06-30"));
    let f = project.for_forecast();
    assert_eq!(f.start_date, Some(date("2024-01-01")));
    assert_eq!(f.end_date, Some(date("2024-06-30")));
    assert_eq!(f.contract_value, Cents::new(120_000));
}

#[test]
fn test_project_new_defaults() {
    let project = Project::new(3, "Audit".into(), Cents::ZERO);
    assert_eq!(project.status, ProjectStatus::Active);
    assert_eq!(project.currency, "USD");
    assert!(project.start_date.is_none());
}

// ── Invoice ───────────────────────────────────────────────────

#[test]
fn test_invoice_paid_amount_only_when_paid() {
    let issued = Invoice::new(1, Cents::new(500));
    assert!(issued.paid_amount().is_none());

    let paid = Invoice::new(1, Cents::new(500)).paid_on(date("2024-02-15"));
    let event = paid.paid_amount().unwrap();
    assert_eq!(event.paid_date, Some(date("2024-02-15")));
    assert_eq!(event.amount, Cents::new(500));
}

#[test]
fn test_invoice_paid_status_without_date_is_not_a_payment() {
    let mut invoice = Invoice::new(1, Cents::new(500));
    invoice.status = InvoiceStatus::Paid;
    assert!(invoice.paid_amount().is_none());
}

#[test]
fn test_invoice_status_roundtrip() {
    for s in &[InvoiceStatus::Issued, InvoiceStatus::Paid, InvoiceStatus::Void] {
        assert_eq!(InvoiceStatus::parse(s.as_str()), Some(*s));
    }
    assert_eq!(InvoiceStatus::parse("PAID"), Some(InvoiceStatus::Paid));
}

// ── PaymentRequest ────────────────────────────────────────────

#[test]
fn test_payment_request_defaults_open() {
    let request = PaymentRequest::new(1, Cents::new(2500));
    assert!(request.is_open());
    assert_eq!(PaymentRequestStatus::parse("canceled"), Some(PaymentRequestStatus::Cancelled));
}

// ── Lead ──────────────────────────────────────────────────────

#[test]
fn test_lead_from_input_valid() {
    let lead = Lead::from_input("Ada", "Acme", "ada@acme.io", "mid", "new", " slow CI ").unwrap();
    assert_eq!(lead.budget_bracket, BudgetBracket::Mid);
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.pain_point, "slow CI");
}

#[test]
fn test_lead_from_input_missing_fields() {
    let err = Lead::from_input("", "Acme", "ada@acme.io", "", "New", "").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required fields: name, budget_bracket"
    );
}

#[test]
fn test_lead_from_input_bad_bracket() {
    let err = Lead::from_input("Ada", "Acme", "ada@acme.io", "Huge", "New", "").unwrap_err();
    assert!(err.to_string().contains("Low, Mid, High"));
}

#[test]
fn test_lead_from_input_bad_status() {
    let err = Lead::from_input("Ada", "Acme", "ada@acme.io", "Low", "Pending", "").unwrap_err();
    assert!(err.to_string().contains("New, Contacted, Won, Lost"));
}

#[test]
fn test_lead_status_closed() {
    assert!(LeadStatus::Won.is_closed());
    assert!(LeadStatus::Lost.is_closed());
    assert!(!LeadStatus::New.is_closed());
    assert_eq!(LeadStatus::all().len(), 4);
}

// ── Tasks ─────────────────────────────────────────────────────

#[test]
fn test_task_status_parse() {
    assert_eq!(TaskStatus::parse("in_progress"), Some(TaskStatus::InProgress));
    assert_eq!(TaskStatus::parse("In Progress"), Some(TaskStatus::InProgress));
    assert_eq!(TaskStatus::parse("in-progress"), Some(TaskStatus::InProgress));
    assert_eq!(TaskStatus::parse(" BLOCKED "), Some(TaskStatus::Blocked));
    assert_eq!(TaskStatus::parse("later"), None);
    for status in TaskStatus::all() {
        assert_eq!(TaskStatus::parse(status.as_str()), Some(*status));
    }
}

#[test]
fn test_task_serializes_snake_case_status() {
    let mut task = Task::new(3, " Launch ".into());
    task.status = TaskStatus::InProgress;
    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["title"], "Launch");
    assert_eq!(value["status"], "in_progress");
    assert_eq!(value["sort_order"], 0);
}

#[test]
fn test_records_serialize_with_cents_field_names() {
    let project = Project::new(1, "Rebuild".into(), Cents::new(300));
    let value = serde_json::to_value(&project).unwrap();
    assert_eq!(value["contract_value_cents"], 300);
    assert_eq!(value["status"], "active");

    let invoice = Invoice::new(1, Cents::new(50)).paid_on(date("2024-02-15"));
    let value = serde_json::to_value(&invoice).unwrap();
    assert_eq!(value["amount_cents"], 50);
    assert_eq!(value["paid_date"], "2024-02-15");
}

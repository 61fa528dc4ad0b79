use serde::{Deserialize, Serialize};

pub mod employee {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Employee {
        /// Never empty for employees returned by the server.
        pub id: String,
        pub first_name: String,
        pub last_name: String,
    }

    impl Employee {
        pub fn full_name(&self) -> String {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EmployeeList {}
}

pub mod transaction {
    use chrono::NaiveDate;

    use super::{employee::Employee, *};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: String,
        /// Major currency units, as delivered by the server.
        pub amount: f64,
        pub employee: Employee,
        pub merchant: String,
        /// Calendar date, `YYYY-MM-DD`.
        pub date: NaiveDate,
        /// Server-side approval state. Clients may override it for display.
        pub approved: bool,
    }

    impl Transaction {
        pub fn employee_id(&self) -> &str {
            self.employee.id.as_str()
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaginatedRequest {
        /// Opaque cursor from a previous `next_page`. `None` asks for the first page.
        pub page: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaginatedResponse<T> {
        pub data: Vec<T>,
        /// Opaque cursor for the following page, `None` once the last page was served.
        pub next_page: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestByEmployee {
        pub employee_id: String,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::transaction::{PaginatedRequest, PaginatedResponse, RequestByEmployee, Transaction};

    #[test]
    fn transaction_reads_camel_case_payload() {
        let raw = r#"{
            "id": "t1",
            "amount": 12.5,
            "employee": { "id": "e1", "firstName": "Alice", "lastName": "Smith" },
            "merchant": "Bar Sport",
            "date": "2024-03-01",
            "approved": false
        }"#;

        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.employee_id(), "e1");
        assert_eq!(tx.employee.full_name(), "Alice Smith");
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(!tx.approved);
    }

    #[test]
    fn last_page_has_null_cursor() {
        let raw = r#"{ "data": [], "nextPage": null }"#;
        let page: PaginatedResponse<Transaction> = serde_json::from_str(raw).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn requests_serialize_with_wire_names() {
        let first = serde_json::to_value(PaginatedRequest::default()).unwrap();
        assert_eq!(first, serde_json::json!({ "page": null }));

        let by_employee = serde_json::to_value(RequestByEmployee {
            employee_id: "e1".to_string(),
        })
        .unwrap();
        assert_eq!(by_employee, serde_json::json!({ "employeeId": "e1" }));
    }
}

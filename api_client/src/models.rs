use serde::{Deserialize, Serialize};

/// Customer record as the backend serializes it. `customer_id` is assigned by
/// the backend, so it is absent on create payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state_province: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub email_id: String,
    #[serde(default)]
    pub web_url: String,
}

/// Quote header. `quote_ref` and `quote_id` are assigned by the backend on
/// creation; `quote_details` is only populated by the by-reference lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub quote_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_details: Option<Vec<QuoteDetail>>,
}

/// Quote line item. `sl_no` is assigned by the backend; `quote_id` is sent
/// when attaching a new item to an existing quote. `item_value` is always
/// `item_quantity * item_unit_rate`, recomputed before any save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl_no: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<i64>,
    #[serde(default)]
    pub item_desc: String,
    #[serde(default)]
    pub item_unit_rate: f64,
    #[serde(default)]
    pub item_quantity: f64,
    #[serde(default)]
    pub item_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_customer_payload_omits_backend_assigned_id() {
        let customer = Customer {
            name: "Acme".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert!(json.get("customerId").is_none());
        assert_eq!(json["name"], "Acme");
        assert_eq!(json["emailId"], "");
    }

    #[test]
    fn quote_from_backend_parses_camel_case_fields() {
        let json = r#"{
            "quoteId": 7,
            "quoteRef": "QR0007",
            "customerId": 3,
            "quoteDate": "2024-05-01",
            "totalQuantity": 2,
            "totalValue": 50.5,
            "quoteDetails": [
                {"slNo": 1, "itemDesc": "Widget", "itemUnitRate": 25.25, "itemQuantity": 2, "itemValue": 50.5}
            ]
        }"#;
        let quote: QuoteHeader = serde_json::from_str(json).unwrap();
        assert_eq!(quote.quote_ref.as_deref(), Some("QR0007"));
        let details = quote.quote_details.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].item_desc, "Widget");
        assert_eq!(details[0].item_value, 50.5);
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured shipment record extracted from a logistics document.
///
/// Every field is optional; an extraction failure yields `ShipmentData::default()`.
/// Scalar fields accept numbers as well as strings because model output is not
/// consistent about quoting identifiers such as MC numbers or ZIP codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentData {
    #[serde(deserialize_with = "lenient::string")]
    pub reference_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub load_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub po_number: Option<String>,

    #[serde(deserialize_with = "lenient::string")]
    pub shipper: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub consignee: Option<String>,
    pub carrier: Option<CarrierInfo>,
    pub driver: Option<DriverInfo>,

    pub pickup: Option<Location>,
    pub drop: Option<Location>,

    #[serde(deserialize_with = "lenient::string")]
    pub shipping_date: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub delivery_date: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub booking_date: Option<String>,

    #[serde(deserialize_with = "lenient::string")]
    pub equipment_type: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub equipment_size: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub load_type: Option<String>,

    pub commodities: Option<Vec<CommodityItem>>,

    pub rate_info: Option<RateInfo>,

    #[serde(deserialize_with = "lenient::string")]
    pub special_instructions: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub shipper_instructions: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub carrier_instructions: Option<String>,

    #[serde(deserialize_with = "lenient::string")]
    pub dispatcher_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub dispatcher_phone: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub dispatcher_email: Option<String>,

    pub additional_data: Option<Map<String, Value>>,
}

impl ShipmentData {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub appointment_time: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub po_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommodityItem {
    #[serde(deserialize_with = "lenient::string")]
    pub commodity_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub weight: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub quantity: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarrierInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub carrier_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub mc_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub driver_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub cell_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub truck_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub trailer_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateInfo {
    #[serde(deserialize_with = "lenient::number")]
    pub total_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub currency: Option<String>,
    pub rate_breakdown: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub data: ShipmentData,
    pub document_id: Option<String>,
}

impl ExtractionResponse {
    pub fn new(data: ShipmentData, document_id: impl Into<String>) -> Self {
        Self {
            data,
            document_id: Some(document_id.into()),
        }
    }

    pub fn empty(document_id: impl Into<String>) -> Self {
        Self::new(ShipmentData::default(), document_id)
    }
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s
                .trim()
                .trim_start_matches('$')
                .replace(',', "")
                .parse()
                .ok(),
            _ => None,
        })
    }
}

use std::fmt::Write as _;
use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::domain::{Chunk, ChunkMetadata, ExtractionResponse, Location, ShipmentData};

const EXTRACTION_SYSTEM_PROMPT: &str = "You are an expert data extraction assistant for logistics documents. \
You reply with a single JSON object and nothing else.";

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract ALL available information from the text provided below. Be thorough and extract:
- Reference IDs, Load IDs, PO numbers
- Shipper, Consignee, Carrier details (name, MC number, phone, email)
- Driver information (name, phone, truck/trailer numbers)
- Pickup and Drop locations (name, address, city, state, zip, appointment times)
- Dates (shipping, delivery, created, booking)
- Equipment details (type, size, load type)
- Commodities (name, weight, quantity, description)
- Rate information (total, currency, breakdown)
- Instructions (special, shipper, carrier)
- Dispatcher information (name, phone, email)

Return a JSON object with these keys:
{
  "reference_id": string, "load_id": string, "po_number": string,
  "shipper": string, "consignee": string,
  "carrier": {"carrier_name": string, "mc_number": string, "phone": string, "email": string},
  "driver": {"driver_name": string, "cell_number": string, "truck_number": string, "trailer_number": string},
  "pickup": {"name": string, "address": string, "city": string, "state": string, "zip_code": string, "country": string, "appointment_time": string, "po_number": string},
  "drop": {same keys as pickup},
  "shipping_date": string, "delivery_date": string, "created_on": string, "booking_date": string,
  "equipment_type": string, "equipment_size": string, "load_type": string,
  "commodities": [{"commodity_name": string, "weight": string, "quantity": string, "description": string}],
  "rate_info": {"total_rate": number, "currency": string, "rate_breakdown": object},
  "special_instructions": string, "shipper_instructions": string, "carrier_instructions": string,
  "dispatcher_name": string, "dispatcher_phone": string, "dispatcher_email": string,
  "additional_data": object
}"#;

/// Turns document text into a [`ShipmentData`] record through the LLM.
pub struct ExtractionService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
}

impl<L> ExtractionService<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    /// Never fails: a model error or unparsable reply yields an empty record.
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn extract(&self, text: &str, document_id: &str) -> ExtractionResponse {
        if text.trim().is_empty() {
            tracing::warn!("No text to extract from");
            return ExtractionResponse::empty(document_id);
        }

        let user_prompt = format!(
            "{EXTRACTION_INSTRUCTIONS}\n\nText:\n{text}\n\n\
             If a field is not present in the document, return null for that field.\n\
             Extract as much detail as possible from the document."
        );

        let reply = match self
            .llm_client
            .complete(EXTRACTION_SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Structured extraction request failed");
                return ExtractionResponse::empty(document_id);
            }
        };

        match parse_shipment_json(&reply) {
            Ok(data) => {
                tracing::info!(
                    reference_id = ?data.reference_id,
                    "Structured data extracted"
                );
                ExtractionResponse::new(data, document_id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Model reply is not a valid shipment record");
                ExtractionResponse::empty(document_id)
            }
        }
    }
}

/// Parses the first JSON object in a model reply, tolerating markdown fences
/// and prose around it.
pub fn parse_shipment_json(reply: &str) -> Result<ShipmentData, serde_json::Error> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    let candidate = match (start, end) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => reply,
    };
    serde_json::from_str(candidate)
}

fn location_label(location: &Location) -> &str {
    location
        .name
        .as_deref()
        .or(location.address.as_deref())
        .unwrap_or("N/A")
}

/// Human-readable rendering of a record, indexed so that structured fields
/// are retrievable by similarity search.
pub fn format_extraction_as_text(data: &ShipmentData) -> String {
    let mut lines = vec!["=== EXTRACTED STRUCTURED DATA ===\n".to_string()];
    let mut push = |line: String| lines.push(line);

    if let Some(v) = &data.reference_id {
        push(format!("Reference ID: {v}"));
    }
    if let Some(v) = &data.load_id {
        push(format!("Load ID: {v}"));
    }
    if let Some(v) = &data.po_number {
        push(format!("PO Number: {v}"));
    }

    if let Some(v) = &data.shipper {
        push(format!("\nShipper: {v}"));
    }
    if let Some(v) = &data.consignee {
        push(format!("Consignee: {v}"));
    }

    if let Some(carrier) = &data.carrier {
        push(format!(
            "\nCarrier Name: {}",
            carrier.carrier_name.as_deref().unwrap_or("N/A")
        ));
        if let Some(v) = &carrier.mc_number {
            push(format!("MC Number: {v}"));
        }
        if let Some(v) = &carrier.phone {
            push(format!("Carrier Phone: {v}"));
        }
    }

    if let Some(driver) = &data.driver {
        push(format!(
            "\nDriver Name: {}",
            driver.driver_name.as_deref().unwrap_or("N/A")
        ));
        if let Some(v) = &driver.cell_number {
            push(format!("Driver Phone: {v}"));
        }
        if let Some(v) = &driver.truck_number {
            push(format!("Truck Number: {v}"));
        }
    }

    if let Some(pickup) = &data.pickup {
        push(format!("\nPickup Location: {}", location_label(pickup)));
        if let Some(city) = &pickup.city {
            push(format!(
                "Pickup City: {city}, {}",
                pickup.state.as_deref().unwrap_or("")
            ));
        }
        if let Some(v) = &pickup.appointment_time {
            push(format!("Pickup Appointment: {v}"));
        }
    }
    if let Some(drop) = &data.drop {
        push(format!("\nDrop Location: {}", location_label(drop)));
        if let Some(city) = &drop.city {
            push(format!(
                "Drop City: {city}, {}",
                drop.state.as_deref().unwrap_or("")
            ));
        }
    }

    if let Some(v) = &data.shipping_date {
        push(format!("\nShipping Date: {v}"));
    }
    if let Some(v) = &data.delivery_date {
        push(format!("Delivery Date: {v}"));
    }

    if let Some(v) = &data.equipment_type {
        push(format!("\nEquipment Type: {v}"));
    }
    if let Some(v) = &data.equipment_size {
        push(format!("Equipment Size: {v} feet"));
    }
    if let Some(v) = &data.load_type {
        push(format!("Load Type: {v}"));
    }

    if let Some(commodities) = data.commodities.as_ref().filter(|c| !c.is_empty()) {
        push("\nCommodities:".to_string());
        for (i, commodity) in commodities.iter().enumerate() {
            let mut entry = format!(
                "  {}. {}",
                i + 1,
                commodity.commodity_name.as_deref().unwrap_or("Unknown")
            );
            if let Some(v) = &commodity.weight {
                let _ = write!(entry, "\n     Weight: {v}");
            }
            if let Some(v) = &commodity.quantity {
                let _ = write!(entry, "\n     Quantity: {v}");
            }
            push(entry);
        }
    }

    if let Some(rate) = &data.rate_info {
        let total = rate
            .total_rate
            .map_or_else(|| "N/A".to_string(), |t| t.to_string());
        push(format!(
            "\nTotal Rate: ${total} {}",
            rate.currency.as_deref().unwrap_or("USD")
        ));
        if let Some(breakdown) = rate.rate_breakdown.as_ref().filter(|b| !b.is_empty()) {
            push(format!(
                "Rate Breakdown: {}",
                serde_json::Value::Object(breakdown.clone())
            ));
        }
    }

    if let Some(v) = &data.special_instructions {
        push(format!("\nSpecial Instructions: {v}"));
    }
    if let Some(v) = &data.shipper_instructions {
        push(format!("Shipper Instructions: {v}"));
    }
    if let Some(v) = &data.carrier_instructions {
        push(format!("Carrier Instructions: {v}"));
    }

    if let Some(v) = &data.dispatcher_name {
        push(format!("\nDispatcher: {v}"));
        if let Some(phone) = &data.dispatcher_phone {
            push(format!("Dispatcher Phone: {phone}"));
        }
    }

    lines.join("\n")
}

/// The sentinel chunk carrying a document's structured record.
pub fn create_structured_chunk(extraction: &ExtractionResponse, filename: &str) -> Chunk {
    Chunk::new(
        format_extraction_as_text(&extraction.data),
        ChunkMetadata::structured_data(filename),
    )
}

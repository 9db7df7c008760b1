use validator::ValidationErrors;

pub fn format_validation_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |err| {
                let reason = match &err.message {
                    Some(message) => message.to_string(),
                    None => match err.code.as_ref() {
                        "length" => "invalid length".to_string(),
                        "range" => "value out of range".to_string(),
                        "required" => "required".to_string(),
                        _ => "invalid value".to_string(),
                    },
                };
                format!("{field}: {reason}")
            })
        })
        .collect();

    messages.sort();

    if messages.is_empty() {
        messages.push("Validation failed".to_string());
    }

    messages
}

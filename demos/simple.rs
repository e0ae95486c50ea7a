use dtcg_core::{parse_tokens_str, ParseOptions};

fn main() {
    let tokens_data = r##"
        {
            "colors": {
                "$type": "color",
                "primary": { "$value": "#0055ff" },
                "secondary": { "$value": "{colors.primary}" }
            },
            "spacing": {
                "base": { "$type": "dimension", "$value": "0.5rem" }
            }
        }
    "##;

    let options = ParseOptions {
        resolve_aliases: true,
        publish_metadata: true,
    };

    match parse_tokens_str(tokens_data, options) {
        Ok(result) => {
            let json_output = result.to_json().unwrap();
            println!("Successfully resolved tokens to JSON:\n{json_output}");
        }
        Err(e) => {
            eprintln!("Failed to parse tokens: {e:?}");
        }
    }
}

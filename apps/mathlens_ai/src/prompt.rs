use serde_json::{Map, Value};

/// Render the solving prompt with the caller's known variables embedded as JSON.
pub fn build_prompt(variables: &Map<String, Value>) -> String {
    let vars = serde_json::to_string(variables).unwrap_or_else(|_| "{}".to_string());

    format!(
        "You have been given an image with some mathematical expressions, equations, or graphical problems, and you need to solve them. \
Note: Use the PEMDAS rule for solving mathematical expressions. PEMDAS stands for the Priority Order: Parentheses, Exponents, \
Multiplication and Division (from left to right), Addition and Subtraction (from left to right). \
For example: Q. 2 + 3 * 4 => 14, Q. 2 + 3 + 5 * 4 - 8 / 2 => 21. \
THERE ARE FIVE POSSIBLE TYPES OF EXPRESSIONS OR EQUATIONS IN THIS IMAGE. ONLY ONE TYPE WILL APPEAR AT A TIME. \
Return the result as a JSON list of objects, no explanation. The five cases are: \
1. Simple expressions like 2 + 2 => return [{{\"expr\": \"2 + 2\", \"result\": 4}}] \
2. Equations like x + y = 5 and y = 2 => return [{{\"expr\": \"x\", \"result\": 3, \"assign\": true}}, {{\"expr\": \"y\", \"result\": 2, \"assign\": true}}] \
3. Assignments like x = 5 => return [{{\"expr\": \"x\", \"result\": 5, \"assign\": true}}] \
4. Graphical math answers => return [{{\"expr\": \"describe expression\", \"result\": answer}}] \
5. Abstract concept in image => return [{{\"expr\": \"description\", \"result\": \"concept\"}}] \
Use this dictionary for variable substitutions: {vars}. \
DO NOT RETURN ANY EXPLANATION. DO NOT USE BACKTICKS OR MARKDOWN. JUST RETURN A RAW JSON STRING EXACTLY LIKE THIS: \
[{{\"expr\": \"x\", \"result\": 5, \"assign\": true}}]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embeds_variables_as_json() {
        let Value::Object(vars) = json!({"x": 5, "name": "π"}) else { unreachable!() };
        let prompt = build_prompt(&vars);
        let embedded = serde_json::to_string(&vars).unwrap();
        assert!(prompt.contains(&format!("variable substitutions: {embedded}.")));
        // non-ascii is passed through, not escaped
        assert!(prompt.contains("π"));
    }

    #[test]
    fn empty_variables_render_as_empty_object() {
        let prompt = build_prompt(&Map::new());
        assert!(prompt.contains("variable substitutions: {}."));
    }

    #[test]
    fn carries_rules_and_cases() {
        let prompt = build_prompt(&Map::new());
        assert!(prompt.contains("PEMDAS"));
        assert!(prompt.contains("FIVE POSSIBLE TYPES"));
        for case in ["1. Simple", "2. Equations", "3. Assignments", "4. Graphical", "5. Abstract"] {
            assert!(prompt.contains(case), "missing case {case}");
        }
        assert!(prompt.contains("DO NOT USE BACKTICKS"));
    }
}

// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Instructions sent alongside every marksheet image.
pub const EXTRACTION_PROMPT: &str = r#"Analyze this image which should contain a university marksheet, grade card, or transcript, and extract academic performance data.

For every subject you can read, extract:
- the subject or course name;
- the credits or units (columns such as "Credits", "Cr", "Units" or "L-T-P"; for L-T-P values like 3-1-2, add the parts together);
- the grade, converted to a 0-10 scale: O=10, A+=9, A=8, B+=7, B=6, C=5, U/F=0; percentages 90-100=10, 80-89=9, 70-79=8, 60-69=7, 50-59=6, 40-49=5, below 40=0; S or AA=10; values already on a 10-point scale are used as-is.

Group subjects by semester when the document shows more than one.

Return ONLY this JSON:
{"semesters": [{"subjects": [{"name": "Subject Name", "credits": "3", "gradePoint": "9"}]}]}

Only if the image contains no academic data at all, return:
{"error": "No academic subjects found. Please ensure the image shows a marksheet with subjects, credits, and grades clearly visible."}"#;

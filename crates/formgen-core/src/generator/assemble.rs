//! Artifact assembly
//!
//! Builds the complete source of each artifact and checks cross-artifact
//! references before the set is handed out.

use super::fragment::{js_string, jsx_text, Fragment};
use super::layout::{self, LayoutParts};
use super::naming::{Names, PERSISTENCE_ENV_VAR};
use super::render::{self, RenderContext};
use super::rules;
use super::submit::{Strategy, SubmissionPlan};
use super::{ArtifactRole, ArtifactSet, GeneratedArtifact};
use crate::config::snapshot;
use crate::error::GenerateError;
use crate::spec::{FormSpec, LayoutStyle, PersistenceTarget, RoutingStyle};
use tracing::debug;

/// Fallback message of server-side failures without their own message
const SERVER_ERROR_MESSAGE: &str = "An error occurred";

/// Build every artifact the configuration asks for
///
/// `spec` must already be validated.
pub fn assemble(spec: &FormSpec) -> Result<ArtifactSet, GenerateError> {
    let names = Names::new(spec);
    let mut artifacts = Vec::new();

    let mut push = |role: ArtifactRole, contents: String| {
        let path = names.path(role);
        debug!(%role, %path, bytes = contents.len(), "assembled artifact");
        artifacts.push(GeneratedArtifact {
            role,
            path,
            contents,
        });
    };

    push(ArtifactRole::Component, component(spec, &names).render());
    push(ArtifactRole::Schema, schema(spec, &names).render());
    if spec.delegated_submission {
        push(ArtifactRole::ServerHandler, server_handler(spec, &names).render());
    }
    if spec.create_endpoint {
        push(ArtifactRole::HttpEndpoint, http_endpoint(spec, &names).render());
    }
    if spec.persistence.is_some() {
        push(ArtifactRole::PersistenceClient, persistence_client(spec).render());
    }
    push(ArtifactRole::ConfigSnapshot, snapshot::to_json(spec)?);

    let set = ArtifactSet::new(artifacts);
    verify(spec, &names, &set)?;
    Ok(set)
}

/// Check that every artifact references the shared names it depends on
fn verify(spec: &FormSpec, names: &Names, set: &ArtifactSet) -> Result<(), GenerateError> {
    let schema_symbol = names.schema_symbol();
    let posts_to_endpoint = SubmissionPlan::select(spec).strategy == Strategy::RemoteEndpoint;

    if posts_to_endpoint && set.get(ArtifactRole::HttpEndpoint).is_none() {
        return Err(GenerateError::Inconsistent {
            role: ArtifactRole::HttpEndpoint.to_string(),
            expected: names.endpoint_url(),
        });
    }

    for artifact in set.iter() {
        let mut expected: Vec<String> = Vec::new();
        match artifact.role {
            ArtifactRole::Component => {
                expected.push(schema_symbol.clone());
                if spec.delegated_submission {
                    expected.push(names.action_symbol());
                }
                if posts_to_endpoint {
                    expected.push(names.endpoint_url());
                }
            }
            ArtifactRole::Schema => expected.push(format!("export const {}", schema_symbol)),
            ArtifactRole::ServerHandler | ArtifactRole::HttpEndpoint => {
                expected.push(names.import_path(artifact.role, ArtifactRole::Schema));
                expected.push(schema_symbol.clone());
            }
            ArtifactRole::PersistenceClient | ArtifactRole::ConfigSnapshot => {}
        }

        if let Some(target) = &spec.persistence {
            let touches_persistence = match artifact.role {
                ArtifactRole::ServerHandler | ArtifactRole::HttpEndpoint => true,
                ArtifactRole::PersistenceClient | ArtifactRole::ConfigSnapshot => true,
                ArtifactRole::Component | ArtifactRole::Schema => false,
            };
            if touches_persistence {
                expected.push(target.database.clone());
                expected.push(target.collection.clone());
            }
        }

        if let Some(missing) = expected.iter().find(|e| !artifact.contents.contains(e.as_str())) {
            return Err(GenerateError::Inconsistent {
                role: artifact.role.to_string(),
                expected: missing.clone(),
            });
        }
    }

    Ok(())
}

fn component(spec: &FormSpec, names: &Names) -> Fragment {
    let schema_symbol = names.schema_symbol();
    let ctx = RenderContext::new(spec);
    let plan = SubmissionPlan::select(spec);

    let layout = layout::compose(
        spec.layout,
        LayoutParts {
            title: spec.name.clone(),
            fields: spec.fields.iter().map(render::render_field).collect(),
            buttons: spec
                .buttons
                .iter()
                .enumerate()
                .map(|(i, b)| render::render_button(b, spec.is_submit(i + 1), &ctx))
                .collect(),
            link: spec.link.as_ref().map(render::render_link),
        },
        spec.horizontal,
        spec.vertical,
        &spec.width,
    );

    let react_import = if spec.theme.is_some() {
        "import { useState, type CSSProperties } from 'react';"
    } else {
        "import { useState } from 'react';"
    };

    let imports = Fragment::seq([
        Fragment::line("'use client';"),
        Fragment::Blank,
        Fragment::line(react_import),
        Fragment::line("import { useForm } from 'react-hook-form';"),
        Fragment::line("import { zodResolver } from '@hookform/resolvers/zod';"),
        Fragment::line("import { z } from 'zod';"),
        Fragment::when(spec.link.is_some(), || Fragment::line("import Link from 'next/link';")),
        Fragment::line("import { Button } from '@/components/ui/button';"),
        Fragment::when(spec.has_single_line_input(), || {
            Fragment::line("import { Input } from '@/components/ui/input';")
        }),
        Fragment::when(spec.has_textarea(), || {
            Fragment::line("import { Textarea } from '@/components/ui/textarea';")
        }),
        Fragment::line(
            "import { Form, FormControl, FormField, FormItem, FormLabel, FormMessage } from '@/components/ui/form';",
        ),
        Fragment::when(spec.layout == LayoutStyle::Card, || {
            Fragment::line(
                "import { Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle } from '@/components/ui/card';",
            )
        }),
        Fragment::line(format!(
            "import {{ {} }} from '{}';",
            schema_symbol,
            names.import_path(ArtifactRole::Component, ArtifactRole::Schema)
        )),
        Fragment::when(spec.delegated_submission, || {
            Fragment::line(format!(
                "import {{ {} }} from '{}';",
                names.action_symbol(),
                names.import_path(ArtifactRole::Component, ArtifactRole::ServerHandler)
            ))
        }),
    ]);

    let theme = match &spec.theme {
        Some(colors) => Fragment::block(
            "const themeStyle = {",
            Fragment::seq([
                Fragment::line(format!("\"--primary-color\": {},", js_string(&colors.primary))),
                Fragment::line(format!(
                    "\"--secondary-color\": {},",
                    js_string(&colors.secondary)
                )),
            ]),
            "} as CSSProperties;",
        ),
        None => Fragment::Empty,
    };

    let default_values = Fragment::seq(
        spec.fields
            .iter()
            .map(|f| Fragment::line(format!("{}: \"\",", f.name))),
    );

    let form_type = format!("z.infer<typeof {}>", schema_symbol);
    let container_open = if spec.theme.is_some() {
        format!(
            "<div className=\"{}\" style={{themeStyle}}>",
            layout.container_class()
        )
    } else {
        format!("<div className=\"{}\">", layout.container_class())
    };

    let view = Fragment::block(
        container_open,
        Fragment::seq([
            Fragment::line(format!(
                "<h1 className=\"text-2xl font-bold mb-4\">{}</h1>",
                jsx_text(&spec.name)
            )),
            Fragment::block(
                "<Form {...form}>",
                Fragment::block(
                    "<form onSubmit={form.handleSubmit(onSubmit)} className=\"space-y-8 w-full\">",
                    layout.body,
                    "</form>",
                ),
                "</Form>",
            ),
            Fragment::when(spec.error_display, || {
                Fragment::line("{error && <p className=\"text-red-500 mt-4\">{error}</p>}")
            }),
            Fragment::line(
                "{successMessage && <p className=\"text-green-500 mt-4\">{successMessage}</p>}",
            ),
        ]),
        "</div>",
    );

    Fragment::seq([
        imports,
        Fragment::Blank,
        theme,
        Fragment::Blank,
        Fragment::block(
            format!("export default function {}() {{", names.component_symbol()),
            Fragment::seq([
                plan.state_hooks(),
                Fragment::block(
                    format!("const form = useForm<{}>({{", form_type),
                    Fragment::seq([
                        Fragment::line(format!("resolver: zodResolver({}),", schema_symbol)),
                        Fragment::block("defaultValues: {", default_values, "},"),
                    ]),
                    "});",
                ),
                Fragment::Blank,
                Fragment::block(
                    format!("const onSubmit = async (data: {}) => {{", form_type),
                    plan.emit(names),
                    "};",
                ),
                Fragment::Blank,
                Fragment::block("return (", view, ");"),
            ]),
            "}",
        ),
    ])
}

fn schema(spec: &FormSpec, names: &Names) -> Fragment {
    let entries = spec.fields.iter().map(|field| {
        let chain = rules::compile(field);
        Fragment::line(format!(
            "{}: {},",
            field.name,
            rules::schema_expression(&chain)
        ))
    });

    Fragment::seq([
        Fragment::line("import { z } from 'zod';"),
        Fragment::Blank,
        Fragment::block(
            format!("export const {} = z.object({{", names.schema_symbol()),
            Fragment::seq(entries),
            "});",
        ),
        Fragment::Blank,
        Fragment::line(format!(
            "export type {}Values = z.infer<typeof {}>;",
            names.form(),
            names.schema_symbol()
        )),
    ])
}

/// Insert `value` into the configured collection
fn persist(target: &PersistenceTarget, value: &str) -> Fragment {
    Fragment::seq([
        Fragment::line("const client = await clientPromise;"),
        Fragment::line(format!("const db = client.db({});", js_string(&target.database))),
        Fragment::line(format!(
            "const collection = db.collection({});",
            js_string(&target.collection)
        )),
        Fragment::line(format!("await collection.insertOne({});", value)),
    ])
}

fn persistence_or_placeholder(spec: &FormSpec, value: &str) -> Fragment {
    match &spec.persistence {
        Some(target) => persist(target, value),
        None => Fragment::seq([
            Fragment::line("// Process the validated data here,"),
            Fragment::line("// e.g. store it or send a notification."),
        ]),
    }
}

fn error_text() -> String {
    format!(
        "error instanceof Error ? error.message : {}",
        js_string(SERVER_ERROR_MESSAGE)
    )
}

fn server_imports(spec: &FormSpec, names: &Names, from: ArtifactRole) -> Fragment {
    Fragment::seq([
        Fragment::line(format!(
            "import {{ {} }} from '{}';",
            names.schema_symbol(),
            names.import_path(from, ArtifactRole::Schema)
        )),
        Fragment::when(spec.persistence.is_some(), || {
            Fragment::line(format!(
                "import clientPromise from '{}';",
                names.import_path(from, ArtifactRole::PersistenceClient)
            ))
        }),
    ])
}

fn server_handler(spec: &FormSpec, names: &Names) -> Fragment {
    Fragment::seq([
        Fragment::line("'use server';"),
        Fragment::Blank,
        server_imports(spec, names, ArtifactRole::ServerHandler),
        Fragment::Blank,
        Fragment::block(
            format!("export async function {}(data: unknown) {{", names.action_symbol()),
            Fragment::seq([
                Fragment::block(
                    "try {",
                    Fragment::seq([
                        Fragment::line(format!(
                            "const validatedData = {}.parse(data);",
                            names.schema_symbol()
                        )),
                        Fragment::Blank,
                        persistence_or_placeholder(spec, "validatedData"),
                        Fragment::Blank,
                        Fragment::line("return { success: true, data: validatedData };"),
                    ]),
                    "} catch (error) {",
                ),
                Fragment::indent(Fragment::seq([
                    Fragment::line("console.error(\"Server action error:\", error);"),
                    Fragment::line(format!(
                        "return {{ success: false, error: {} }};",
                        error_text()
                    )),
                ])),
                Fragment::line("}"),
            ]),
            "}",
        ),
    ])
}

fn http_endpoint(spec: &FormSpec, names: &Names) -> Fragment {
    let from = ArtifactRole::HttpEndpoint;
    match spec.routing {
        RoutingStyle::App => Fragment::seq([
            Fragment::line("import { NextResponse } from 'next/server';"),
            server_imports(spec, names, from),
            Fragment::Blank,
            Fragment::block(
                "export async function POST(req: Request) {",
                Fragment::seq([
                    Fragment::block(
                        "try {",
                        Fragment::seq([
                            Fragment::line("const body = await req.json();"),
                            Fragment::line(format!(
                                "const data = {}.parse(body);",
                                names.schema_symbol()
                            )),
                            Fragment::Blank,
                            persistence_or_placeholder(spec, "data"),
                            Fragment::Blank,
                            Fragment::line("return NextResponse.json({ success: true, data });"),
                        ]),
                        "} catch (error) {",
                    ),
                    Fragment::indent(Fragment::seq([
                        Fragment::line("console.error(\"API route error:\", error);"),
                        Fragment::line("return NextResponse.json("),
                        Fragment::indent(Fragment::seq([
                            Fragment::line(format!(
                                "{{ success: false, error: {} }},",
                                error_text()
                            )),
                            Fragment::line("{ status: 400 },"),
                        ])),
                        Fragment::line(");"),
                    ])),
                    Fragment::line("}"),
                ]),
                "}",
            ),
        ]),
        RoutingStyle::Pages => Fragment::seq([
            Fragment::line("import type { NextApiRequest, NextApiResponse } from 'next';"),
            server_imports(spec, names, from),
            Fragment::Blank,
            Fragment::block(
                "export default async function handler(req: NextApiRequest, res: NextApiResponse) {",
                Fragment::seq([
                    Fragment::block(
                        "if (req.method !== 'POST') {",
                        Fragment::seq([
                            Fragment::line("res.setHeader('Allow', ['POST']);"),
                            Fragment::line(
                                "res.status(405).end(`Method ${req.method} Not Allowed`);",
                            ),
                            Fragment::line("return;"),
                        ]),
                        "}",
                    ),
                    Fragment::Blank,
                    Fragment::block(
                        "try {",
                        Fragment::seq([
                            Fragment::line(format!(
                                "const data = {}.parse(req.body);",
                                names.schema_symbol()
                            )),
                            Fragment::Blank,
                            persistence_or_placeholder(spec, "data"),
                            Fragment::Blank,
                            Fragment::line("res.status(200).json({ success: true, data });"),
                        ]),
                        "} catch (error) {",
                    ),
                    Fragment::indent(Fragment::seq([
                        Fragment::line("console.error(\"API route error:\", error);"),
                        Fragment::line(format!(
                            "res.status(400).json({{ success: false, error: {} }});",
                            error_text()
                        )),
                    ])),
                    Fragment::line("}"),
                ]),
                "}",
            ),
        ]),
    }
}

const MONGODB_CLIENT: &str = r#"import { MongoClient, MongoClientOptions } from 'mongodb';

if (!process.env.{ENV}) {
  throw new Error('Invalid/Missing environment variable: "{ENV}"');
}

const uri = process.env.{ENV};
const options: MongoClientOptions = {};

let client: MongoClient;
let clientPromise: Promise<MongoClient>;

declare global {
  // eslint-disable-next-line no-var
  var _mongoClientPromise: Promise<MongoClient> | undefined;
}

if (process.env.NODE_ENV === 'development') {
  // Reuse the connection across hot reloads.
  if (!global._mongoClientPromise) {
    client = new MongoClient(uri, options);
    global._mongoClientPromise = client.connect();
  }
  clientPromise = global._mongoClientPromise;
} else {
  client = new MongoClient(uri, options);
  clientPromise = client.connect();
}

export default clientPromise;"#;

fn persistence_client(spec: &FormSpec) -> Fragment {
    let constants = match &spec.persistence {
        Some(target) => Fragment::seq([
            Fragment::line(format!(
                "export const databaseName = {};",
                js_string(&target.database)
            )),
            Fragment::line(format!(
                "export const collectionName = {};",
                js_string(&target.collection)
            )),
        ]),
        None => Fragment::Empty,
    };

    Fragment::seq([
        Fragment::text(&MONGODB_CLIENT.replace("{ENV}", PERSISTENCE_ENV_VAR)),
        Fragment::Blank,
        constants,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ButtonSpec, ButtonVariant, FieldSpec, FieldType, ThemeColors};

    fn contact() -> FormSpec {
        let mut spec = FormSpec::new("Contact");
        spec.fields = vec![
            FieldSpec::new("email", FieldType::Email).with_validation("required"),
            FieldSpec::new("message", FieldType::Textarea).with_validation("max:500"),
        ];
        spec.buttons = vec![ButtonSpec::new("Send", ButtonVariant::Default)];
        spec
    }

    fn with_persistence(mut spec: FormSpec) -> FormSpec {
        spec.persistence = Some(PersistenceTarget {
            database: "crm".to_string(),
            collection: "leads".to_string(),
        });
        spec
    }

    #[test]
    fn test_component_imports_match_usage() {
        let out = component(&contact(), &Names::new(&contact())).render();
        assert!(out.starts_with("'use client';\n\nimport { useState } from 'react';"));
        assert!(out.contains("import { Input } from '@/components/ui/input';"));
        assert!(out.contains("import { Textarea } from '@/components/ui/textarea';"));
        assert!(out.contains("import { ContactSchema } from '../ContactSchema';"));
        assert!(!out.contains("next/link"));
        assert!(!out.contains("ContactAction"));
        assert!(!out.contains("components/ui/card"));
        assert!(out.contains("export default function ContactForm() {"));
        assert!(out.contains("    defaultValues: {\n      email: \"\",\n      message: \"\",\n    },"));
    }

    #[test]
    fn test_component_theme_style() {
        let mut spec = contact();
        spec.theme = Some(ThemeColors {
            primary: "#112233".to_string(),
            secondary: "#445566".to_string(),
        });
        let out = component(&spec, &Names::new(&spec)).render();
        assert!(out.contains("import { useState, type CSSProperties } from 'react';"));
        assert!(out.contains("const themeStyle = {\n  \"--primary-color\": \"#112233\",\n  \"--secondary-color\": \"#445566\",\n} as CSSProperties;"));
        assert!(out.contains("style={themeStyle}>"));
    }

    #[test]
    fn test_schema_entries() {
        let spec = contact();
        let out = schema(&spec, &Names::new(&spec)).render();
        assert_eq!(
            out,
            "import { z } from 'zod';\n\nexport const ContactSchema = z.object({\n  email: z.string().nonempty(\"This field is required\").email(\"Invalid email address\"),\n  message: z.string().max(500, \"Maximum 500 characters allowed\"),\n});\n\nexport type ContactValues = z.infer<typeof ContactSchema>;\n"
        );
    }

    #[test]
    fn test_server_handler_with_persistence() {
        let mut spec = with_persistence(contact());
        spec.delegated_submission = true;
        let out = server_handler(&spec, &Names::new(&spec)).render();
        assert!(out.starts_with("'use server';\n\nimport { ContactSchema } from '../ContactSchema';\nimport clientPromise from '../lib/mongodb';\n"));
        assert!(out.contains("    const db = client.db(\"crm\");\n    const collection = db.collection(\"leads\");\n    await collection.insertOne(validatedData);\n"));
    }

    #[test]
    fn test_app_endpoint_shape() {
        let mut spec = contact();
        spec.create_endpoint = true;
        let out = http_endpoint(&spec, &Names::new(&spec)).render();
        assert!(out.contains("import { ContactSchema } from '../../../ContactSchema';"));
        assert!(out.contains("export async function POST(req: Request) {"));
        assert!(out.contains("{ status: 400 },"));
        assert!(out.contains("// Process the validated data here,"));
        assert!(!out.contains("clientPromise"));
    }

    #[test]
    fn test_pages_endpoint_shape() {
        let mut spec = with_persistence(contact());
        spec.create_endpoint = true;
        spec.routing = RoutingStyle::Pages;
        let out = http_endpoint(&spec, &Names::new(&spec)).render();
        assert!(out.contains("import { ContactSchema } from '../../ContactSchema';"));
        assert!(out.contains("import clientPromise from '../../lib/mongodb';"));
        assert!(out.contains("export default async function handler(req: NextApiRequest, res: NextApiResponse) {"));
        assert!(out.contains("res.status(405).end(`Method ${req.method} Not Allowed`);"));
        assert!(out.contains("await collection.insertOne(data);"));
    }

    #[test]
    fn test_persistence_client_reads_env_var() {
        let spec = with_persistence(contact());
        let out = persistence_client(&spec).render();
        assert!(out.contains("if (!process.env.MONGODB_URI) {"));
        assert!(out.contains("export default clientPromise;\n\nexport const databaseName = \"crm\";\nexport const collectionName = \"leads\";\n"));
    }

    #[test]
    fn test_verify_reports_missing_reference() {
        let spec = contact();
        let names = Names::new(&spec);
        let set = ArtifactSet::new(vec![GeneratedArtifact {
            role: ArtifactRole::Schema,
            path: names.path(ArtifactRole::Schema),
            contents: "export const Other = z.object({});\n".to_string(),
        }]);
        let err = verify(&spec, &names, &set).unwrap_err();
        assert!(err.to_string().contains("export const ContactSchema"));
    }

    #[test]
    fn test_verify_requires_endpoint_the_component_posts_to() {
        let spec = with_persistence(contact());
        let names = Names::new(&spec);
        let set = ArtifactSet::new(vec![GeneratedArtifact {
            role: ArtifactRole::Component,
            path: names.path(ArtifactRole::Component),
            contents: component(&spec, &names).render(),
        }]);
        match verify(&spec, &names, &set) {
            Err(GenerateError::Inconsistent { role, expected }) => {
                assert_eq!(role, "API route");
                assert_eq!(expected, "/api/Contact");
            }
            other => panic!("expected missing endpoint, got {:?}", other),
        }
    }
}

//! Section 3: Microsoft Purview

use crate::admin::Source;
use crate::checks::{CheckDescriptor, CheckMetadata, Expect, FieldRule, Level, License, Rule, Section};
use crate::session::Service;

pub const CHECKS: &[CheckDescriptor] = &[AUDIT_LOG_SEARCH];

const AUDIT_LOG_SEARCH: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "3.1.1",
        title: "Ensure Microsoft 365 audit log search is Enabled",
        section: Section::Purview,
        level: Level::L1,
        license: License::E3,
        services: &[Service::ExchangeOnline],
        description: "When audit log search is enabled in the Microsoft Purview compliance portal, \
            user and admin activity from the organization is recorded in the audit log and retained \
            for 180 days by default.",
        rationale: "Audit records are needed to investigate security incidents and to answer \
            compliance inquiries. Without them an incident cannot be reconstructed.",
        audit: "Run Get-AdminAuditLogConfig and confirm UnifiedAuditLogIngestionEnabled is True.",
        remediation: "Microsoft Purview > Audit: select 'Start recording user and admin activity', \
            or run Set-AdminAuditLogConfig -UnifiedAuditLogIngestionEnabled $true.",
        cis_controls: &["8.2"],
        references: &[
            "https://learn.microsoft.com/en-us/purview/audit-log-enable-disable",
        ],
    },
    source: Source::AdminAuditLogConfig,
    rule: Rule::Each(&[FieldRule::new(
        "UnifiedAuditLogIngestionEnabled",
        Expect::Is(true),
    )]),
};

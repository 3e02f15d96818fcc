//! Section 7: SharePoint admin center

use crate::admin::Source;
use crate::checks::{CheckDescriptor, CheckMetadata, Expect, FieldRule, Level, License, Rule, Section};
use crate::session::Service;

pub const CHECKS: &[CheckDescriptor] = &[
    MODERN_AUTH,
    EXTERNAL_SHARING,
    GUEST_RESHARING,
    UNMANAGED_SYNC,
];

const MODERN_AUTH: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "7.2.1",
        title: "Ensure modern authentication for SharePoint applications is required",
        section: Section::SharePoint,
        level: Level::L1,
        license: License::E3,
        services: &[Service::Graph],
        description: "Legacy authentication protocols let apps that do not use modern \
            authentication access SharePoint and OneDrive content.",
        rationale: "Apps using legacy authentication bypass multifactor authentication and \
            conditional access.",
        audit: "GET /admin/sharepoint/settings and confirm isLegacyAuthProtocolsEnabled is false.",
        remediation: "SharePoint admin center > Policies > Access control > Apps that don't use \
            modern authentication: select Block access.",
        cis_controls: &["3.10"],
        references: &[
            "https://learn.microsoft.com/en-us/graph/api/resources/sharepointsettings",
        ],
    },
    source: Source::SharePointSettings,
    rule: Rule::Each(&[FieldRule::new("isLegacyAuthProtocolsEnabled", Expect::Is(false))]),
};

const EXTERNAL_SHARING: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "7.2.3",
        title: "Ensure external content sharing is restricted",
        section: Section::SharePoint,
        level: Level::L1,
        license: License::E3,
        services: &[Service::Graph],
        description: "The external sharing level controls who content in SharePoint and OneDrive \
            can be shared with.",
        rationale: "Anonymous sharing links can be forwarded to anyone. Restricting sharing to \
            authenticated guests keeps access attributable.",
        audit: "GET /admin/sharepoint/settings and confirm sharingCapability is \
            externalUserSharingOnly, existingExternalUserSharingOnly or disabled.",
        remediation: "SharePoint admin center > Policies > Sharing: set the SharePoint slider to \
            'New and existing guests' or a more restrictive level.",
        cis_controls: &["3.3"],
        references: &[
            "https://learn.microsoft.com/en-us/sharepoint/turn-external-sharing-on-or-off",
        ],
    },
    source: Source::SharePointSettings,
    rule: Rule::Each(&[FieldRule::new(
        "sharingCapability",
        Expect::OneOf(&[
            "externalUserSharingOnly",
            "existingExternalUserSharingOnly",
            "disabled",
        ]),
    )
    .labelled("External sharing level")]),
};

const GUEST_RESHARING: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "7.2.5",
        title: "Ensure that SharePoint guest users cannot share items they don't own",
        section: Section::SharePoint,
        level: Level::L2,
        license: License::E3,
        services: &[Service::Graph],
        description: "By default guests can reshare items shared with them if they have edit \
            permission.",
        rationale: "Resharing by guests moves control of organizational content outside the \
            organization.",
        audit: "GET /admin/sharepoint/settings and confirm isResharingByExternalUsersEnabled is false.",
        remediation: "SharePoint admin center > Policies > Sharing > More external sharing settings: \
            clear 'Allow guests to share items they don't own'.",
        cis_controls: &["3.3"],
        references: &[
            "https://learn.microsoft.com/en-us/sharepoint/external-sharing-overview",
        ],
    },
    source: Source::SharePointSettings,
    rule: Rule::Each(&[FieldRule::new(
        "isResharingByExternalUsersEnabled",
        Expect::Is(false),
    )]),
};

const UNMANAGED_SYNC: CheckDescriptor = CheckDescriptor {
    metadata: &CheckMetadata {
        id: "7.3.2",
        title: "Ensure OneDrive sync is restricted for unmanaged devices",
        section: Section::SharePoint,
        level: Level::L2,
        license: License::E3,
        services: &[Service::Graph],
        description: "The OneDrive sync app can be limited to computers joined to the \
            organization's domains.",
        rationale: "Synced files on unmanaged devices leave the organization's control.",
        audit: "GET /admin/sharepoint/settings and confirm isUnmanagedSyncAppForTenantRestricted \
            is true.",
        remediation: "SharePoint admin center > Settings > OneDrive - Sync: check 'Allow syncing \
            only on computers joined to specific domains' and add the domain GUIDs.",
        cis_controls: &[],
        references: &[
            "https://learn.microsoft.com/en-us/sharepoint/allow-syncing-only-on-specific-domains",
        ],
    },
    source: Source::SharePointSettings,
    rule: Rule::Each(&[FieldRule::new(
        "isUnmanagedSyncAppForTenantRestricted",
        Expect::Is(true),
    )]),
};

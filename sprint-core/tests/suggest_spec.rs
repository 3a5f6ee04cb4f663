use sprint_core::suggest;
use speculate2::speculate;

fn headings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

speculate! {
    describe "command hints" {
        it "maps nmap to port_scan" {
            assert_eq!(suggest("22/tcp open ssh", Some("nmap"), &[]), "port_scan");
        }

        it "maps ffuf to ffuf_output" {
            assert_eq!(suggest("/admin [Status: 200]", Some("ffuf"), &[]), "ffuf_output");
        }

        it "maps directory brute forcers and crackers" {
            assert_eq!(suggest("", Some("gobuster dir -u http://x"), &[]), "dir_scan");
            assert_eq!(suggest("", Some("hashcat"), &[]), "hash_crack");
            assert_eq!(suggest("", Some("john"), &[]), "hash_crack");
        }

        it "uses the program name of a full path with arguments" {
            assert_eq!(suggest("", Some("/usr/bin/NMAP -sV -oN /tmp/out.txt"), &[]), "port_scan");
        }

        it "synthesizes a label for unknown tools" {
            assert_eq!(suggest("", Some("enum4linux"), &[]), "enum4linux_output");
            assert_eq!(suggest("", Some("./my-tool.sh --flag"), &[]), "my_tool_sh_output");
        }

        it "takes priority over heading matches" {
            let known = headings(&["Executive Summary"]);
            assert_eq!(suggest("# Executive Summary", Some("nmap"), &known), "port_scan");
        }

        it "treats a blank command as absent" {
            assert_eq!(suggest("text", Some("   "), &[]), "capture");
        }
    }

    describe "heading hints" {
        it "matches a markdown heading on the first line" {
            let known = headings(&["Executive Summary", "Attack Vectors"]);
            assert_eq!(suggest("## Executive Summary\n...", None, &known), "executive_summary");
        }

        it "matches case-insensitively inside a longer line" {
            let known = headings(&["Attack Vectors"]);
            assert_eq!(suggest("Notes on attack vectors for host A", None, &known), "attack_vectors");
        }

        it "does not match a short text against a longer heading" {
            let known = headings(&["Attack Vectors"]);
            assert_eq!(suggest("Attack", None, &known), "capture");
        }

        it "only looks at the first non-empty line" {
            let known = headings(&["Attack Vectors"]);
            assert_eq!(suggest("\nintro\nAttack Vectors", None, &known), "capture");
        }

        it "returns the first matching heading" {
            let known = headings(&["Findings", "Findings Summary"]);
            assert_eq!(suggest("# Findings Summary", None, &known), "findings");
        }
    }

    describe "fallback" {
        it "returns capture without hints" {
            assert_eq!(suggest("anything", None, &[]), "capture");
        }

        it "returns capture for empty text" {
            let known = headings(&["Executive Summary"]);
            assert_eq!(suggest("", None, &known), "capture");
        }
    }
}
